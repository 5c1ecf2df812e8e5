use anyhow::Result;
use dotstash_exec::CommandRunner;
use dotstash_store::default_manifest_path;

use crate::flows::{
    format_batch_summary_line, run_export_command, run_list_command, run_restore_command,
    run_update_command, BatchReport, ExportOutcome, ListOutcome, RestoreOutcome, UpdateOutcome,
};
use crate::prompt::ConfirmPrompt;
use crate::render::{format_tool_table_lines, TerminalRenderer};
use crate::{Cli, Commands};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommandStatus {
    Success,
    Failed,
}

pub(crate) const NO_TOOLS_FOUND: &str = "No tools found";

pub(crate) fn run_cli(
    cli: Cli,
    runner: &impl CommandRunner,
    prompt: &impl ConfirmPrompt,
) -> Result<CommandStatus> {
    let renderer = TerminalRenderer::current();
    let manifest_path = match cli.file {
        Some(path) => path,
        None => default_manifest_path()?,
    };

    let status = match cli.command {
        Commands::Export => {
            report_export_outcome(&renderer, run_export_command(runner, &manifest_path)?)
        }
        Commands::Restore => match run_restore_command(runner, &renderer, &manifest_path)? {
            RestoreOutcome::ManifestMissing { path } => {
                renderer.print_error(&format!("File not found: {}", path.display()));
                CommandStatus::Success
            }
            RestoreOutcome::NothingToRestore => {
                renderer.print_status("warn", NO_TOOLS_FOUND);
                CommandStatus::Success
            }
            RestoreOutcome::Completed(report) => finish_batch(&renderer, &report),
        },
        Commands::Update { no_export } => {
            match run_update_command(runner, &renderer, prompt, no_export, &manifest_path)? {
                UpdateOutcome::Aborted => {
                    println!("Aborting");
                    CommandStatus::Success
                }
                UpdateOutcome::NoToolsFound => {
                    renderer.print_status("warn", NO_TOOLS_FOUND);
                    CommandStatus::Success
                }
                UpdateOutcome::Completed { report, export } => {
                    let batch_status = finish_batch(&renderer, &report);
                    let export_status = match export {
                        Some(outcome) => report_export_outcome(&renderer, outcome),
                        None => CommandStatus::Success,
                    };
                    combine_status(batch_status, export_status)
                }
            }
        }
        Commands::List { installed } => {
            match run_list_command(runner, installed, &manifest_path)? {
                ListOutcome::ManifestMissing { path } => {
                    renderer.print_error(&format!("File not found: {}", path.display()));
                    CommandStatus::Success
                }
                ListOutcome::Records(records) => {
                    if records.is_empty() {
                        renderer.print_status("warn", NO_TOOLS_FOUND);
                    } else {
                        renderer.print_lines(&format_tool_table_lines(&records));
                    }
                    CommandStatus::Success
                }
            }
        }
    };

    Ok(status)
}

fn report_export_outcome(renderer: &TerminalRenderer, outcome: ExportOutcome) -> CommandStatus {
    match outcome {
        ExportOutcome::Written { path, count } => {
            renderer.print_status("ok", &format!("exported {count} tools to {}", path.display()));
            CommandStatus::Success
        }
        ExportOutcome::NoToolsFound => {
            renderer.print_status("warn", NO_TOOLS_FOUND);
            CommandStatus::Success
        }
        ExportOutcome::WriteFailed { message } => {
            renderer.print_error(&message);
            CommandStatus::Failed
        }
    }
}

fn finish_batch(renderer: &TerminalRenderer, report: &BatchReport) -> CommandStatus {
    let status = if report.any_failed() { "warn" } else { "ok" };
    renderer.print_status(status, &format_batch_summary_line(report));
    if report.any_failed() {
        CommandStatus::Failed
    } else {
        CommandStatus::Success
    }
}

fn combine_status(left: CommandStatus, right: CommandStatus) -> CommandStatus {
    if left == CommandStatus::Failed || right == CommandStatus::Failed {
        CommandStatus::Failed
    } else {
        CommandStatus::Success
    }
}
