use std::io::IsTerminal;
use std::time::Duration;

use anstyle::{AnsiColor, Effects, Style};
use dotstash_core::ToolRecord;
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum OutputStyle {
    Plain,
    Rich,
}

pub(crate) fn current_output_style() -> OutputStyle {
    if std::env::var_os("NO_COLOR").is_some() {
        return OutputStyle::Plain;
    }
    if std::io::stdout().is_terminal() && std::io::stderr().is_terminal() {
        OutputStyle::Rich
    } else {
        OutputStyle::Plain
    }
}

pub(crate) fn render_status_line(style: OutputStyle, status: &str, message: &str) -> String {
    match style {
        OutputStyle::Plain => message.to_string(),
        OutputStyle::Rich => format!("{} {message}", status_badge(status)),
    }
}

fn status_badge(status: &str) -> &'static str {
    match status {
        "ok" => "[OK]",
        "warn" => "[WARN]",
        "error" => "[ERR]",
        _ => "[..]",
    }
}

pub(crate) fn render_error_line(style: OutputStyle, message: &str) -> String {
    match style {
        OutputStyle::Plain => format!("error: {message}"),
        OutputStyle::Rich => colorize(error_style(), &format!("[ERR] {message}")),
    }
}

fn error_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightRed.into()))
        .effects(Effects::BOLD)
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}

const PACKAGE_ID_HEADER: &str = "Package Id";
const VERSION_HEADER: &str = "Version";

/// Gap between the two table columns; matches the manifest padding so the
/// table and the file line up the same way.
const TABLE_COLUMN_GAP: usize = dotstash_core::MANIFEST_PAD;

pub(crate) fn format_tool_table_lines(records: &[ToolRecord]) -> Vec<String> {
    let id_width = records
        .iter()
        .map(|record| record.package_id.len())
        .max()
        .unwrap_or(0)
        .max(PACKAGE_ID_HEADER.len());
    let version_width = records
        .iter()
        .map(|record| record.version.len())
        .max()
        .unwrap_or(0)
        .max(VERSION_HEADER.len());
    let column = id_width + TABLE_COLUMN_GAP;

    let mut lines = Vec::with_capacity(records.len() + 2);
    lines.push(format!("{PACKAGE_ID_HEADER:<column$}{VERSION_HEADER}"));
    lines.push(format!(
        "{:<column$}{}",
        "-".repeat(id_width),
        "-".repeat(version_width)
    ));
    for record in records {
        lines.push(format!("{:<column$}{}", record.package_id, record.version));
    }
    lines
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct TerminalRenderer {
    style: OutputStyle,
}

impl TerminalRenderer {
    pub(crate) fn from_style(style: OutputStyle) -> Self {
        Self { style }
    }

    pub(crate) fn current() -> Self {
        Self::from_style(current_output_style())
    }

    pub(crate) fn print_status(self, status: &str, message: &str) {
        println!("{}", render_status_line(self.style, status, message));
    }

    pub(crate) fn print_error(self, message: &str) {
        eprintln!("{}", render_error_line(self.style, message));
    }

    pub(crate) fn print_lines(self, lines: &[String]) {
        for line in lines {
            println!("{line}");
        }
    }

    pub(crate) fn start_progress(self, label: &str, total: u64) -> TerminalProgress {
        let progress_bar = if self.style == OutputStyle::Rich {
            let progress_bar = ProgressBar::new(total.max(1));
            if let Ok(style) = ProgressStyle::with_template(
                "{spinner:.cyan.bold} {msg:<8} [{bar:20.cyan/blue}] {pos:>3}/{len:3}",
            ) {
                progress_bar.set_style(style.progress_chars("=>-"));
            }
            progress_bar.set_message(label.to_string());
            progress_bar.enable_steady_tick(Duration::from_millis(80));
            Some(progress_bar)
        } else {
            None
        };

        TerminalProgress {
            style: self.style,
            progress_bar,
        }
    }
}

pub(crate) struct TerminalProgress {
    style: OutputStyle,
    progress_bar: Option<ProgressBar>,
}

impl TerminalProgress {
    pub(crate) fn set(&self, current: u64) {
        if let Some(progress_bar) = &self.progress_bar {
            progress_bar.set_position(current);
        }
    }

    /// Prints a forwarded subprocess line without clobbering the live bar.
    pub(crate) fn println(&self, line: &str) {
        match &self.progress_bar {
            Some(progress_bar) => progress_bar.println(line),
            None => println!("{line}"),
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        let line = render_error_line(self.style, message);
        match &self.progress_bar {
            Some(progress_bar) => progress_bar.println(line),
            None => eprintln!("{line}"),
        }
    }

    pub(crate) fn finish_and_clear(self) {
        if let Some(progress_bar) = self.progress_bar {
            progress_bar.finish_and_clear();
        }
    }
}
