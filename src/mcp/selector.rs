//! Interactive server selection
//!
//! `build_toggle_list` turns the registry into checkbox rows; `ServerPrompt`
//! is the single blocking point where a human picks the active set.

use std::io;

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::MultiSelect;
use indexmap::IndexSet;

use super::types::{compare_names, Registry, Selection, ServerState, ServerToggleItem};
use crate::error::{LmcpError, Result};

const PAGE_SIZE: usize = 15;

/// Rows for the checkbox prompt, sorted by name.
///
/// A name present in both documents is listed once, as active.
pub fn build_toggle_list(registry: &Registry) -> Vec<ServerToggleItem> {
    let mut items: Vec<ServerToggleItem> = registry
        .active
        .keys()
        .map(|name| toggle_item(name, ServerState::Active))
        .collect();

    items.extend(
        registry
            .disabled
            .keys()
            .filter(|name| !registry.active.contains_key(*name))
            .map(|name| toggle_item(name, ServerState::Disabled)),
    );

    items.sort_by(|a, b| compare_names(&a.name, &b.name));
    items
}

fn toggle_item(name: &str, state: ServerState) -> ServerToggleItem {
    let marker = match state {
        ServerState::Active => style("✓").green(),
        ServerState::Disabled => style("✗").red(),
    };
    ServerToggleItem {
        label: format!(
            "{} {} {}",
            marker,
            name,
            style(format!("({})", state.as_str())).dim()
        ),
        name: name.to_string(),
        checked: state == ServerState::Active,
    }
}

/// Source of the user's selection
pub trait ServerPrompt {
    fn select(&self, items: &[ServerToggleItem]) -> Result<Selection>;
}

/// Checkbox prompt on the controlling terminal
pub struct TerminalPrompt {
    term: Term,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerPrompt for TerminalPrompt {
    fn select(&self, items: &[ServerToggleItem]) -> Result<Selection> {
        println!("{}", style("MCP Server Manager").blue());
        println!(
            "{}",
            style("Select which MCP servers should be active in Claude:").dim()
        );
        println!();

        let choices: Vec<(&str, bool)> = items
            .iter()
            .map(|item| (item.label.as_str(), item.checked))
            .collect();

        let picked = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Toggle MCP servers (Press Ctrl+C to cancel)")
            .items_checked(&choices)
            .max_length(PAGE_SIZE)
            .interact_on_opt(&self.term);

        if picked.is_err() {
            let _ = self.term.show_cursor();
        }
        selection_from(items, picked)
    }
}

/// Map the raw prompt result onto a selection.
///
/// Esc/`q` and Ctrl+C (raw mode surfaces it as an interrupted read) cancel;
/// any other I/O error is a prompt failure.
fn selection_from(
    items: &[ServerToggleItem],
    picked: io::Result<Option<Vec<usize>>>,
) -> Result<Selection> {
    match picked {
        Ok(Some(indices)) => Ok(Selection::Confirmed(selected_names(items, &indices))),
        Ok(None) => Ok(Selection::Cancelled),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(Selection::Cancelled),
        Err(e) => Err(LmcpError::Prompt(e)),
    }
}

fn selected_names(items: &[ServerToggleItem], indices: &[usize]) -> IndexSet<String> {
    indices
        .iter()
        .filter_map(|&i| items.get(i))
        .map(|item| item.name.clone())
        .collect()
}
