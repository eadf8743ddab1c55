//! MCP Configuration File Storage
//!
//! Reads are lenient: a missing, unreadable or corrupt file is an empty
//! document. Writes are strict and replace the target through a temp file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::types::{ConfigDocument, Registry, MCP_SERVERS_FIELD};
use crate::error::{LmcpError, Result};
use crate::settings::ConfigPaths;

/// Read a config document, never failing.
pub fn read_document(path: &Path) -> ConfigDocument {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("Config file {} not found, treating as empty", path.display());
            return ConfigDocument::new();
        }
        Err(e) => {
            log::warn!("Failed to read {}: {}", path.display(), e);
            return ConfigDocument::new();
        }
    };

    if content.trim().is_empty() {
        return ConfigDocument::new();
    }

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(root)) => {
            if let Some(servers) = root.get(MCP_SERVERS_FIELD).filter(|v| !v.is_object()) {
                log::warn!(
                    "Ignoring non-object {} field ({}) in {}",
                    MCP_SERVERS_FIELD,
                    json_kind(servers),
                    path.display()
                );
            }
            ConfigDocument::from_map(root)
        }
        Ok(_) => {
            log::warn!("Config file {} is not a JSON object, ignoring it", path.display());
            ConfigDocument::new()
        }
        Err(e) => {
            log::warn!("Failed to parse {}: {}", path.display(), e);
            ConfigDocument::new()
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Write a config document with two-space indentation.
///
/// The content goes to `<file>.tmp` first and is renamed over the target.
/// A symlinked target is written through to the file it points at, and an
/// existing file keeps its permissions.
pub fn write_document(path: &Path, doc: &ConfigDocument) -> Result<()> {
    let mut content =
        serde_json::to_string_pretty(doc.as_map()).map_err(|source| LmcpError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
    content.push('\n');

    let target = resolve_write_target(path);

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| LmcpError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let tmp_path = tmp_path_for(&target);
    fs::write(&tmp_path, content).map_err(|source| LmcpError::Write {
        path: tmp_path.clone(),
        source,
    })?;

    if let Err(source) = copy_permissions(&target, &tmp_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(LmcpError::Write {
            path: tmp_path,
            source,
        });
    }

    if let Err(source) = fs::rename(&tmp_path, &target) {
        let _ = fs::remove_file(&tmp_path);
        return Err(LmcpError::Rename {
            path: target,
            source,
        });
    }

    log::info!("Wrote {}", target.display());
    Ok(())
}

/// Follow a symlinked config to the real file, including a dangling link
fn resolve_write_target(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(path).unwrap_or_else(|_| {
            match fs::read_link(path) {
                Ok(link) => match path.parent() {
                    Some(parent) => parent.join(link),
                    None => link,
                },
                Err(_) => path.to_path_buf(),
            }
        }),
        _ => path.to_path_buf(),
    }
}

/// Give the temp file the mode of the file it replaces (config may hold tokens)
fn copy_permissions(target: &Path, tmp_path: &Path) -> io::Result<()> {
    match fs::metadata(target) {
        Ok(meta) if meta.is_file() => fs::set_permissions(tmp_path, meta.permissions()),
        _ => Ok(()),
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("config.json");
    path.with_file_name(format!("{}.tmp", file_name))
}

/// Load both documents and project their server maps.
pub fn get_all_servers(paths: &ConfigPaths) -> Registry {
    Registry {
        active: read_document(&paths.active).servers(),
        disabled: read_document(&paths.disabled).servers(),
    }
}
