use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotstash_exec::SystemCommandRunner;

mod dispatch;
mod flows;
mod prompt;
mod render;


use crate::dispatch::{run_cli, CommandStatus};
use crate::prompt::TerminalPrompt;
use crate::render::{current_output_style, render_error_line};

#[derive(Parser, Debug)]
#[command(name = "dotstash")]
#[command(about = "Snapshot, restore, and update global dotnet tools", long_about = None)]
struct Cli {
    /// Manifest file used for export, restore, and list.
    #[arg(long, global = true)]
    file: Option<PathBuf>,
    /// Log every external command before it runs.
    #[arg(long, global = true, hide = true)]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export the installed global tools to the manifest file
    Export,
    /// Install every tool recorded in the manifest file
    Restore,
    /// Update all installed global tools
    Update {
        /// Skip re-exporting the manifest after updating.
        #[arg(long)]
        no_export: bool,
    },
    /// List tools from the manifest file or the installed set
    List {
        /// List the currently installed tools instead of the manifest.
        #[arg(long)]
        installed: bool,
    },
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run_cli(cli, &SystemCommandRunner, &TerminalPrompt) {
        Ok(CommandStatus::Success) => ExitCode::SUCCESS,
        Ok(CommandStatus::Failed) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!(
                "{}",
                render_error_line(current_output_style(), &format!("{err:#}"))
            );
            ExitCode::FAILURE
        }
    }
}
