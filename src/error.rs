//! Error types
//!
//! Reading a config file never fails (see `mcp::config_store::read_document`),
//! so every variant here belongs to the write path, the prompt, or startup.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LmcpError {
    #[error("Failed to resolve home directory")]
    HomeDirNotFound,
    #[error("Failed to serialize config for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to replace config file {path}: {source}")]
    Rename {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to show server selection: {0}")]
    Prompt(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LmcpError>;
