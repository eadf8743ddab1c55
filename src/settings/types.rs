use std::path::{Path, PathBuf};

use crate::error::{LmcpError, Result};

/// File read by Claude; servers listed here are active
pub const ACTIVE_CONFIG_FILE: &str = ".claude.json";
/// File owned by lmcp; servers listed here are parked
pub const DISABLED_CONFIG_FILE: &str = ".lmcp.json";

/// Locations of the two server documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub active: PathBuf,
    pub disabled: PathBuf,
}

impl ConfigPaths {
    pub fn new(active: impl Into<PathBuf>, disabled: impl Into<PathBuf>) -> Self {
        Self {
            active: active.into(),
            disabled: disabled.into(),
        }
    }

    /// Default locations under the given home directory
    pub fn in_home(home: &Path) -> Self {
        Self::new(home.join(ACTIVE_CONFIG_FILE), home.join(DISABLED_CONFIG_FILE))
    }
}

/// Runtime settings resolved once at startup
#[derive(Debug, Clone)]
pub struct LmcpSettings {
    pub paths: ConfigPaths,
    /// Directory for daily log files, `None` when no data/home dir exists
    pub log_dir: Option<PathBuf>,
}

impl LmcpSettings {
    /// Resolve settings, letting explicit paths override the home defaults.
    ///
    /// The home directory is only required when at least one path is not
    /// overridden.
    pub fn resolve(active: Option<PathBuf>, disabled: Option<PathBuf>) -> Result<Self> {
        let home = dirs::home_dir();

        let resolve_one = |explicit: Option<PathBuf>, file: &str| -> Result<PathBuf> {
            match explicit {
                Some(path) => Ok(path),
                None => home
                    .as_ref()
                    .map(|h| h.join(file))
                    .ok_or(LmcpError::HomeDirNotFound),
            }
        };

        let paths = ConfigPaths::new(
            resolve_one(active, ACTIVE_CONFIG_FILE)?,
            resolve_one(disabled, DISABLED_CONFIG_FILE)?,
        );

        Ok(Self {
            paths,
            log_dir: default_log_dir(),
        })
    }
}

/// `<data dir>/lmcp/logs`, falling back to `~/.lmcp/logs`
pub fn default_log_dir() -> Option<PathBuf> {
    dirs::data_dir()
        .map(|p| p.join("lmcp").join("logs"))
        .or_else(|| dirs::home_dir().map(|p| p.join(".lmcp").join("logs")))
}
