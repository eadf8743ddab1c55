use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use console::style;

use lmcp_lib::{init_logging, run, LmcpError, LmcpSettings};

/// Claude MCP Server Manager
///
/// Toggle MCP servers between ~/.claude.json (active) and ~/.lmcp.json
/// (disabled) without losing their configuration.
#[derive(Parser, Debug)]
#[command(name = "lmcp", version, about, long_about)]
struct Cli {
    /// Config file holding the active servers
    #[arg(long, env = "LMCP_ACTIVE_CONFIG", value_name = "PATH")]
    active_config: Option<PathBuf>,

    /// Config file holding the disabled servers
    #[arg(long, env = "LMCP_DISABLED_CONFIG", value_name = "PATH")]
    disabled_config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match LmcpSettings::resolve(cli.active_config, cli.disabled_config) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red(), e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(settings.log_dir.as_deref());

    match run(&settings) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            let heading = match e.downcast_ref::<LmcpError>() {
                Some(LmcpError::Prompt(_)) | None => "Error:",
                Some(_) => "Failed to save configuration:",
            };
            eprintln!("{} {:#}", style(heading).red(), e);
            ExitCode::FAILURE
        }
    }
}
