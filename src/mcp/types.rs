//! Type definitions for MCP server toggling
//!
//! Server entries are kept as opaque JSON so fields this tool does not know
//! about survive a move between files untouched.

use std::cmp::Ordering;

use indexmap::IndexSet;
use serde_json::{Map, Value};

/// Top-level field holding the server map in both documents
pub const MCP_SERVERS_FIELD: &str = "mcpServers";

/// Ordered name -> server entry map (`preserve_order` keeps file order)
pub type ServerMap = Map<String, Value>;

/// One parsed config file.
///
/// Wraps the top-level object as-is; only `mcpServers` is ever touched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigDocument {
    root: Map<String, Value>,
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(root: Map<String, Value>) -> Self {
        Self { root }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Server map of this document, empty when the field is missing or
    /// is not an object
    pub fn servers(&self) -> ServerMap {
        match self.root.get(MCP_SERVERS_FIELD) {
            Some(Value::Object(servers)) => servers.clone(),
            _ => ServerMap::new(),
        }
    }

    /// Replace the server map, keeping the field's position when it exists
    pub fn set_servers(&mut self, servers: ServerMap) {
        self.root
            .insert(MCP_SERVERS_FIELD.to_string(), Value::Object(servers));
    }
}

/// Server maps of both documents for one run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Registry {
    pub active: ServerMap,
    pub disabled: ServerMap,
}

impl Registry {
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.disabled.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServerState {
    Active,
    Disabled,
}

impl ServerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerState::Active => "active",
            ServerState::Disabled => "disabled",
        }
    }
}

/// Row of the checkbox prompt
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerToggleItem {
    /// Display text with status marker, e.g. `✓ github (active)`
    pub label: String,
    pub name: String,
    pub checked: bool,
}

/// Result of the interactive selection
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Names that should end up active; may be empty
    Confirmed(IndexSet<String>),
    Cancelled,
}

/// Where each server ended up after a toggle
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToggleReport {
    pub servers: Vec<(String, ServerState)>,
}

impl ToggleReport {
    pub fn active_count(&self) -> usize {
        self.count(ServerState::Active)
    }

    pub fn disabled_count(&self) -> usize {
        self.count(ServerState::Disabled)
    }

    fn count(&self, state: ServerState) -> usize {
        self.servers.iter().filter(|(_, s)| *s == state).count()
    }
}

/// How a run of the toggle command ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    NoServers,
    Cancelled,
    Applied(ToggleReport),
}

/// Name ordering used for display and reporting.
///
/// Case-insensitive first so `Docker` sorts next to `docker`, then the raw
/// string to keep the order total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
