//! Command line entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use courseplay_tools::ToolError;
use courseplay_tools::config::ConfigManager;
use courseplay_tools::help_menu::export_help_menu;
use courseplay_tools::log_info::{
    extract_log_info,
    write_report,
};
use courseplay_tools::templates::update_templates;
use courseplay_tools::translation::{
    create_initial_master,
    synchronize,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "courseplay-tools", version, about = "Maintenance tools for the Courseplay mod")]
struct Cli {
    /// Repository root, relative paths of the configuration are resolved against it
    #[arg(long, value_name = "DIR", default_value = ".", global = true)]
    workspace: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Regenerate every language file from the master translations
    SyncTranslations,
    /// Create the master translation file from the existing language files
    InitMaster {
        /// Overwrite an existing master file
        #[arg(long)]
        force: bool,
    },
    /// Export the help menu for the website
    HelpMenu,
    /// Extract versions, savegame and mods from a game log
    LogInfo {
        #[arg(value_name = "LOG_FILE")]
        log: PathBuf,
        /// Write the JSON report to this file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Update the version dropdowns of the issue templates
    UpdateTemplates,
}

fn run(cli: Cli) -> Result<(), ToolError> {
    let mut config = ConfigManager::new();
    config.load_settings(cli.workspace)?;

    match cli.command {
        Command::SyncTranslations => {
            let report = synchronize(&config)?;
            tracing::info!(
                written = report.written.len(),
                skipped = report.skipped.len(),
                "Synchronized translations"
            );
        }
        Command::InitMaster { force } => {
            create_initial_master(&config, force)?;
        }
        Command::HelpMenu => {
            export_help_menu(&config)?;
        }
        Command::LogInfo { log, output } => {
            let report = extract_log_info(&log)?;
            write_report(&report, output.as_deref())?;
        }
        Command::UpdateTemplates => {
            let report = update_templates(&config)?;
            tracing::info!(
                patched = report.patched.len(),
                skipped = report.skipped.len(),
                "Updated issue templates"
            );
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    // RUST_LOG が無ければ INFO
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}
