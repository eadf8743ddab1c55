//! Settings Module
//!
//! Resolves where the active/disabled server documents and the log files live.

pub mod types;

pub use types::*;
