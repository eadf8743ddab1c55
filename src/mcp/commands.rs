//! MCP toggle command
//!
//! Load -> Present -> Collect -> Partition -> Persist -> Report. No file is
//! opened for writing before a selection is confirmed.

use console::style;

use super::config_store::get_all_servers;
use super::selector::{build_toggle_list, ServerPrompt};
use super::toggle::apply_selection;
use super::types::{Selection, ToggleOutcome};
use crate::error::Result;
use crate::settings::ConfigPaths;

/// Run one interactive toggle against `paths`.
pub fn toggle_mcp_servers(paths: &ConfigPaths, prompt: &dyn ServerPrompt) -> Result<ToggleOutcome> {
    let registry = get_all_servers(paths);
    log::info!(
        "Loaded {} active and {} disabled MCP servers",
        registry.active.len(),
        registry.disabled.len()
    );

    let items = build_toggle_list(&registry);
    if items.is_empty() {
        log::info!("No MCP servers found, nothing to toggle");
        return Ok(ToggleOutcome::NoServers);
    }

    let selected = match prompt.select(&items)? {
        Selection::Confirmed(selected) => selected,
        Selection::Cancelled => {
            log::info!("Selection cancelled by user");
            return Ok(ToggleOutcome::Cancelled);
        }
    };

    let report = apply_selection(paths, &selected)?;
    Ok(ToggleOutcome::Applied(report))
}

/// Print the user-facing result of a finished run
pub fn print_outcome(paths: &ConfigPaths, outcome: &ToggleOutcome) {
    match outcome {
        ToggleOutcome::NoServers => println!(
            "{}",
            style(format!(
                "No MCP servers found in {} or {}",
                paths.active.display(),
                paths.disabled.display()
            ))
            .yellow()
        ),
        ToggleOutcome::Cancelled => println!("{}", style("\nCancelled").yellow()),
        ToggleOutcome::Applied(report) => report.print(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LmcpError;
    use crate::mcp::types::{ServerState, ServerToggleItem};
    use indexmap::IndexSet;
    use serde_json::{json, Value};
    use std::cell::RefCell;
    use std::fs;
    use std::io;

    /// Prompt that answers from a script and records what it was shown
    struct ScriptedPrompt {
        answer: RefCell<Option<Result<Selection>>>,
        shown: RefCell<Vec<ServerToggleItem>>,
    }

    impl ScriptedPrompt {
        fn new(answer: Result<Selection>) -> Self {
            Self {
                answer: RefCell::new(Some(answer)),
                shown: RefCell::new(Vec::new()),
            }
        }

        fn confirm(names: &[&str]) -> Self {
            let set: IndexSet<String> = names.iter().map(|n| n.to_string()).collect();
            Self::new(Ok(Selection::Confirmed(set)))
        }
    }

    impl ServerPrompt for ScriptedPrompt {
        fn select(&self, items: &[ServerToggleItem]) -> Result<Selection> {
            *self.shown.borrow_mut() = items.to_vec();
            self.answer
                .borrow_mut()
                .take()
                .expect("prompt shown more than once")
        }
    }

    fn write_json(path: &std::path::Path, value: Value) {
        fs::write(path, serde_json::to_string_pretty(&value).expect("json")).expect("write");
    }

    fn read_json(path: &std::path::Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).expect("read")).expect("parse")
    }

    #[test]
    fn test_no_servers_skips_prompt_and_writes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = ConfigPaths::in_home(dir.path());
        let prompt = ScriptedPrompt::confirm(&[]);

        let outcome = toggle_mcp_servers(&paths, &prompt).expect("run");

        assert_eq!(outcome, ToggleOutcome::NoServers);
        assert!(prompt.shown.borrow().is_empty());
        assert!(!paths.active.exists());
        assert!(!paths.disabled.exists());
    }

    #[test]
    fn test_cancel_leaves_files_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = ConfigPaths::in_home(dir.path());
        fs::write(&paths.active, "{\"mcpServers\":{\"github\":{\"command\":\"x\"}}}").expect("write");

        let outcome =
            toggle_mcp_servers(&paths, &ScriptedPrompt::new(Ok(Selection::Cancelled))).expect("run");

        assert_eq!(outcome, ToggleOutcome::Cancelled);
        assert_eq!(
            fs::read_to_string(&paths.active).expect("read"),
            "{\"mcpServers\":{\"github\":{\"command\":\"x\"}}}"
        );
        assert!(!paths.disabled.exists());
    }

    #[test]
    fn test_confirmed_selection_swaps_servers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = ConfigPaths::in_home(dir.path());
        write_json(&paths.active, json!({"mcpServers": {"github": {"command": "x"}}}));
        write_json(&paths.disabled, json!({"mcpServers": {"docker": {"command": "y"}}}));
        let prompt = ScriptedPrompt::confirm(&["docker"]);

        let outcome = toggle_mcp_servers(&paths, &prompt).expect("run");

        let shown: Vec<(String, bool)> = prompt
            .shown
            .borrow()
            .iter()
            .map(|i| (i.name.clone(), i.checked))
            .collect();
        assert_eq!(
            shown,
            vec![("docker".to_string(), false), ("github".to_string(), true)]
        );

        assert_eq!(read_json(&paths.active), json!({"mcpServers": {"docker": {"command": "y"}}}));
        assert_eq!(read_json(&paths.disabled), json!({"mcpServers": {"github": {"command": "x"}}}));
        match outcome {
            ToggleOutcome::Applied(report) => assert_eq!(
                report.servers,
                vec![
                    ("docker".to_string(), ServerState::Active),
                    ("github".to_string(), ServerState::Disabled),
                ]
            ),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_empty_confirmation_disables_all() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = ConfigPaths::in_home(dir.path());
        write_json(
            &paths.active,
            json!({"mcpServers": {"github": {"command": "x"}, "context7": {"command": "z"}}}),
        );

        toggle_mcp_servers(&paths, &ScriptedPrompt::confirm(&[])).expect("run");

        assert_eq!(read_json(&paths.active), json!({"mcpServers": {}}));
        assert_eq!(
            read_json(&paths.disabled),
            json!({"mcpServers": {"context7": {"command": "z"}, "github": {"command": "x"}}})
        );
    }

    #[test]
    fn test_prompt_failure_propagates_without_writes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = ConfigPaths::in_home(dir.path());
        write_json(&paths.active, json!({"mcpServers": {"github": {"command": "x"}}}));
        let failure = LmcpError::Prompt(io::Error::new(io::ErrorKind::Other, "not a terminal"));

        let err = toggle_mcp_servers(&paths, &ScriptedPrompt::new(Err(failure))).unwrap_err();

        assert!(matches!(err, LmcpError::Prompt(_)));
        assert!(!paths.disabled.exists());
    }
}
