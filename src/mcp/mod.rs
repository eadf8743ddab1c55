//! MCP Server Toggle Module
//!
//! Moves MCP server entries between the active config file (read by Claude)
//! and a disabled config file so servers can be switched off without losing
//! their configuration.

pub mod types;
pub mod config_store;
pub mod selector;
pub mod toggle;
pub mod commands;

pub use commands::*;
