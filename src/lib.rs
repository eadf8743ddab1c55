use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::info;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};

// Module declarations
pub mod error;
pub mod mcp;
pub mod settings;

pub use error::LmcpError;
pub use mcp::types::ToggleOutcome;
pub use settings::{ConfigPaths, LmcpSettings};

const LOG_FILE_PREFIX: &str = "lmcp_";
const LOG_FILES_KEPT: usize = 7;

/// Initialise logging: warnings go to stderr, everything from Info up goes to
/// a per-day file under `log_dir`. Returns the log file path when the file
/// logger could be set up.
pub fn init_logging(log_dir: Option<&Path>) -> Option<PathBuf> {
    let term_config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Warn,
        term_config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    let log_file = log_dir.and_then(open_log_file);
    if let Some((path, file)) = log_file {
        loggers.push(WriteLogger::new(LevelFilter::Info, Config::default(), file));
        if CombinedLogger::init(loggers).is_err() {
            eprintln!("Failed to initialise logging");
            return None;
        }
        prune_old_logs(path.parent().unwrap_or(Path::new(".")));
        return Some(path);
    }

    let _ = CombinedLogger::init(loggers);
    None
}

/// Open today's log file in append mode, creating the directory if needed
fn open_log_file(log_dir: &Path) -> Option<(PathBuf, fs::File)> {
    if let Err(e) = fs::create_dir_all(log_dir) {
        eprintln!("Failed to create log directory {}: {}", log_dir.display(), e);
        return None;
    }

    let date = chrono::Local::now().format("%Y%m%d");
    let path = log_dir.join(format!("{}{}.log", LOG_FILE_PREFIX, date));

    match fs::OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => Some((path, file)),
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
            None
        }
    }
}

/// Keep only the newest log files
fn prune_old_logs(log_dir: &Path) {
    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };

    let mut log_files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().starts_with(LOG_FILE_PREFIX))
                .unwrap_or(false)
        })
        .collect();

    // Date-stamped names sort chronologically
    log_files.sort_by(|a, b| b.cmp(a));

    for old_log in log_files.into_iter().skip(LOG_FILES_KEPT) {
        let _ = fs::remove_file(old_log);
    }
}

/// Run the interactive toggle on the terminal and print its result.
pub fn run(settings: &LmcpSettings) -> anyhow::Result<ToggleOutcome> {
    info!("========================================");
    info!("lmcp {} starting", env!("CARGO_PKG_VERSION"));
    info!("Active config: {}", settings.paths.active.display());
    info!("Disabled config: {}", settings.paths.disabled.display());

    let prompt = mcp::selector::TerminalPrompt::new();
    let outcome = mcp::toggle_mcp_servers(&settings.paths, &prompt)
        .map_err(|e| {
            // Terminal logger only shows warnings; the caller reports the error.
            info!("Toggle failed: {}", e);
            e
        })
        .context("Failed to toggle MCP servers")?;

    mcp::print_outcome(&settings.paths, &outcome);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prune_old_logs_keeps_newest() {
        let dir = tempfile::tempdir().expect("tempdir");
        for day in 1..=9 {
            fs::write(dir.path().join(format!("lmcp_202601{:02}.log", day)), "").expect("write");
        }
        fs::write(dir.path().join("other.log"), "").expect("write");

        prune_old_logs(dir.path());

        let mut left: Vec<String> = fs::read_dir(dir.path())
            .expect("read_dir")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        left.sort();
        assert_eq!(left.len(), LOG_FILES_KEPT + 1);
        assert_eq!(left[0], "lmcp_20260103.log");
        assert!(left.contains(&"other.log".to_string()));
    }

    #[test]
    fn test_open_log_file_creates_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let log_dir = dir.path().join("logs");
        let (path, _file) = open_log_file(&log_dir).expect("log file");
        assert!(path.starts_with(&log_dir));
        assert!(path.exists());
    }
}
