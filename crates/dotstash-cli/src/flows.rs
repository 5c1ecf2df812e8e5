use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dotstash_core::{parse_tool_lines, ToolRecord};
use dotstash_exec::{CommandOutput, CommandRunner};
use dotstash_store::{read_manifest, write_manifest};
use tracing::debug;

use crate::prompt::ConfirmPrompt;
use crate::render::{TerminalProgress, TerminalRenderer};

pub(crate) const TOOL_PROGRAM: &str = "dotnet";

/// The listing prints a fixed two-row banner (column headers plus their
/// underline) ahead of the data rows. The offset is tied to the external
/// command's output shape and breaks if that shape ever changes.
pub(crate) const LISTING_BANNER_ROWS: usize = 2;

/// An empty listing is retried this many times before the tool set is
/// accepted as genuinely empty; a freshly installed SDK can report nothing
/// on its first calls.
pub(crate) const MAX_LISTING_ATTEMPTS: usize = 5;

pub(crate) const UPDATE_CONFIRM_PROMPT: &str =
    "Are you sure you want to update all of your global dotnet tools?";

pub(crate) fn listing_args() -> Vec<String> {
    to_args(&["tool", "list", "--global"])
}

pub(crate) fn install_args(record: &ToolRecord) -> Vec<String> {
    to_args(&[
        "tool",
        "install",
        &record.package_id,
        "--version",
        &record.version,
        "--global",
    ])
}

pub(crate) fn update_args(record: &ToolRecord) -> Vec<String> {
    to_args(&["tool", "update", &record.package_id, "--global"])
}

fn to_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}

pub(crate) fn parse_listing_output(stdout: &str) -> Result<Vec<ToolRecord>> {
    let rows = stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .skip(LISTING_BANNER_ROWS)
        .collect::<Vec<_>>();
    parse_tool_lines(&rows).context("failed to parse tool listing output")
}

pub(crate) fn fetch_installed_tools(runner: &impl CommandRunner) -> Result<Vec<ToolRecord>> {
    let mut records = Vec::new();
    for attempt in 1..=MAX_LISTING_ATTEMPTS {
        let output = runner.run(TOOL_PROGRAM, &listing_args())?;
        records = parse_listing_output(&output.stdout)?;
        if !records.is_empty() {
            break;
        }
        debug!(attempt, "tool listing returned no rows");
    }
    Ok(records)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BatchReport {
    pub(crate) operation: &'static str,
    pub(crate) outcome_label: &'static str,
    pub(crate) succeeded: usize,
    pub(crate) failed: usize,
}

impl BatchReport {
    fn new(operation: &'static str, outcome_label: &'static str) -> Self {
        Self {
            operation,
            outcome_label,
            succeeded: 0,
            failed: 0,
        }
    }

    pub(crate) fn any_failed(&self) -> bool {
        self.failed > 0
    }
}

pub(crate) fn format_batch_summary_line(report: &BatchReport) -> String {
    format!(
        "{} summary: {}={} failed={}",
        report.operation, report.outcome_label, report.succeeded, report.failed
    )
}

#[derive(Debug)]
pub(crate) enum ExportOutcome {
    Written { path: PathBuf, count: usize },
    NoToolsFound,
    WriteFailed { message: String },
}

pub(crate) fn run_export_command(
    runner: &impl CommandRunner,
    path: &Path,
) -> Result<ExportOutcome> {
    let records = fetch_installed_tools(runner)?;
    if records.is_empty() {
        return Ok(ExportOutcome::NoToolsFound);
    }

    // Write failures surface in the outcome, not as a propagated error.
    match write_manifest(path, &records) {
        Ok(written) => Ok(ExportOutcome::Written {
            path: written,
            count: records.len(),
        }),
        Err(err) => Ok(ExportOutcome::WriteFailed {
            message: format!("{err:#}"),
        }),
    }
}

#[derive(Debug)]
pub(crate) enum RestoreOutcome {
    ManifestMissing { path: PathBuf },
    NothingToRestore,
    Completed(BatchReport),
}

pub(crate) fn run_restore_command(
    runner: &impl CommandRunner,
    renderer: &TerminalRenderer,
    path: &Path,
) -> Result<RestoreOutcome> {
    let Some(records) = read_manifest(path)? else {
        return Ok(RestoreOutcome::ManifestMissing {
            path: path.to_path_buf(),
        });
    };
    if records.is_empty() {
        return Ok(RestoreOutcome::NothingToRestore);
    }

    renderer.print_status("step", &format!("restoring {} tools", records.len()));
    let report = run_tool_batch(runner, renderer, &records, "restore", "installed", install_args);
    Ok(RestoreOutcome::Completed(report))
}

#[derive(Debug)]
pub(crate) enum UpdateOutcome {
    Aborted,
    NoToolsFound,
    Completed {
        report: BatchReport,
        export: Option<ExportOutcome>,
    },
}

pub(crate) fn run_update_command(
    runner: &impl CommandRunner,
    renderer: &TerminalRenderer,
    prompt: &impl ConfirmPrompt,
    no_export: bool,
    path: &Path,
) -> Result<UpdateOutcome> {
    if !prompt.confirm(UPDATE_CONFIRM_PROMPT) {
        return Ok(UpdateOutcome::Aborted);
    }

    let records = fetch_installed_tools(runner)?;
    if records.is_empty() {
        return Ok(UpdateOutcome::NoToolsFound);
    }

    renderer.print_status("step", &format!("updating {} tools", records.len()));
    let report = run_tool_batch(runner, renderer, &records, "update", "updated", update_args);

    // The export takes its own fresh listing; the loop above may have moved
    // every version.
    let export = if no_export {
        None
    } else {
        Some(run_export_command(runner, path)?)
    };

    Ok(UpdateOutcome::Completed { report, export })
}

#[derive(Debug)]
pub(crate) enum ListOutcome {
    Records(Vec<ToolRecord>),
    ManifestMissing { path: PathBuf },
}

pub(crate) fn run_list_command(
    runner: &impl CommandRunner,
    installed: bool,
    path: &Path,
) -> Result<ListOutcome> {
    if installed {
        return Ok(ListOutcome::Records(fetch_installed_tools(runner)?));
    }

    match read_manifest(path)? {
        Some(records) => Ok(ListOutcome::Records(records)),
        None => Ok(ListOutcome::ManifestMissing {
            path: path.to_path_buf(),
        }),
    }
}

// Records run strictly one at a time: global tool installs contend on the
// SDK's package cache, and a failure must only ever take down its own row.
fn run_tool_batch(
    runner: &impl CommandRunner,
    renderer: &TerminalRenderer,
    records: &[ToolRecord],
    operation: &'static str,
    outcome_label: &'static str,
    build_args: fn(&ToolRecord) -> Vec<String>,
) -> BatchReport {
    let progress = renderer.start_progress(operation, records.len() as u64);
    let mut report = BatchReport::new(operation, outcome_label);
    for (index, record) in records.iter().enumerate() {
        let result = runner.run(TOOL_PROGRAM, &build_args(record));
        record_batch_result(&progress, &mut report, record, result);
        progress.set((index + 1) as u64);
    }
    progress.finish_and_clear();
    report
}

fn record_batch_result(
    progress: &TerminalProgress,
    report: &mut BatchReport,
    record: &ToolRecord,
    result: Result<CommandOutput>,
) {
    let output = match result {
        Ok(output) => output,
        Err(err) => {
            progress.print_error(&format!("{}: {err:#}", record.package_id));
            report.failed += 1;
            return;
        }
    };

    for line in output
        .stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
    {
        progress.println(line);
    }

    let stderr = output.stderr.trim();
    let mut command_failed = false;
    if !stderr.is_empty() {
        progress.print_error(&format!("{}: {stderr}", record.package_id));
        command_failed = true;
    }
    if !output.success() {
        if stderr.is_empty() {
            progress.print_error(&format!(
                "{}: external command exited with {}",
                record.package_id,
                describe_exit(output.exit_code)
            ));
        }
        command_failed = true;
    }

    if command_failed {
        report.failed += 1;
    } else {
        report.succeeded += 1;
    }
}

fn describe_exit(exit_code: Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}
