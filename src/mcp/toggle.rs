//! Server partitioning
//!
//! Redistributes every known server into exactly one of the two documents
//! and persists both.

use console::style;
use indexmap::IndexSet;

use super::config_store::{read_document, write_document};
use super::types::{compare_names, ConfigDocument, ServerMap, ServerState, ToggleReport};
use crate::error::Result;
use crate::settings::ConfigPaths;

/// Split all servers of both documents by `selected`.
///
/// Every known name lands in exactly one output document. When a name exists
/// in both inputs the active payload wins. Selected names that neither
/// document knows are ignored.
pub fn partition(
    mut active_doc: ConfigDocument,
    mut disabled_doc: ConfigDocument,
    selected: &IndexSet<String>,
) -> (ConfigDocument, ConfigDocument, ToggleReport) {
    let mut all_servers = disabled_doc.servers();
    for (name, entry) in active_doc.servers() {
        all_servers.insert(name, entry);
    }

    let mut entries: Vec<_> = all_servers.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| compare_names(a, b));

    let mut active = ServerMap::new();
    let mut disabled = ServerMap::new();
    let mut report = ToggleReport::default();

    for (name, entry) in entries {
        let state = if selected.contains(&name) {
            active.insert(name.clone(), entry);
            ServerState::Active
        } else {
            disabled.insert(name.clone(), entry);
            ServerState::Disabled
        };
        report.servers.push((name, state));
    }

    active_doc.set_servers(active);
    disabled_doc.set_servers(disabled);
    (active_doc, disabled_doc, report)
}

/// Re-read both documents, apply `selected` and write them back.
///
/// The active document is written first. The first write error aborts the
/// operation; nothing is retried or rolled back.
pub fn apply_selection(paths: &ConfigPaths, selected: &IndexSet<String>) -> Result<ToggleReport> {
    let (active_doc, disabled_doc, report) = partition(
        read_document(&paths.active),
        read_document(&paths.disabled),
        selected,
    );

    write_document(&paths.active, &active_doc)?;
    write_document(&paths.disabled, &disabled_doc)?;

    log::info!(
        "Toggled MCP servers: {} active, {} disabled",
        report.active_count(),
        report.disabled_count()
    );
    Ok(report)
}

impl ToggleReport {
    /// Print per-server status lines and the count summary
    pub fn print(&self) {
        for (name, state) in &self.servers {
            match state {
                ServerState::Active => {
                    println!("{}", style(format!("✓ Enabled: {}", name)).green())
                }
                ServerState::Disabled => {
                    println!("{}", style(format!("✗ Disabled: {}", name)).red())
                }
            }
        }

        println!();
        println!("{}", style("Configuration updated successfully!").blue());
        println!(
            "{}",
            style(format!("Active servers: {}", self.active_count())).dim()
        );
        println!(
            "{}",
            style(format!("Disabled servers: {}", self.disabled_count())).dim()
        );
    }
}
