use anyhow::Result;

use crate::parse::parse_tool_lines;
use crate::record::ToolRecord;

/// Columns of padding past the longest package id, so the file reads as an
/// aligned table when opened raw.
pub const MANIFEST_PAD: usize = 5;

const LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Renders records as `<package-id padded>\t<version>` rows, in the order
/// given.
///
/// The padding is cosmetic: readers tokenize on whitespace runs, and the
/// stable part of the format is two whitespace-separated tokens per row.
pub fn render_manifest(records: &[ToolRecord]) -> String {
    let width = records
        .iter()
        .map(|record| record.package_id.len())
        .max()
        .unwrap_or(0)
        + MANIFEST_PAD;

    let mut payload = String::new();
    for record in records {
        payload.push_str(&format!(
            "{:<width$}\t{}{}",
            record.package_id, record.version, LINE_ENDING
        ));
    }
    payload
}

/// Parses manifest file text. Blank rows are skipped; padding and `\r\n`
/// terminators are tolerated.
pub fn parse_manifest_text(raw: &str) -> Result<Vec<ToolRecord>> {
    let rows = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>();
    parse_tool_lines(&rows)
}
