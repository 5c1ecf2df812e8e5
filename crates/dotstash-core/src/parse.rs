use anyhow::{anyhow, Result};

use crate::record::ToolRecord;

/// Parses rows of the form `<package-id> <version> [extra columns...]`.
///
/// Tokens are whitespace runs; columns past the second are ignored (the
/// listing output carries a trailing commands column the manifest never
/// records). A row with fewer than two tokens fails the whole parse, so a
/// damaged input is never silently truncated to the rows before it.
pub fn parse_tool_lines(lines: &[&str]) -> Result<Vec<ToolRecord>> {
    let mut records = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        let mut tokens = line.split_whitespace();
        let (Some(package_id), Some(version)) = (tokens.next(), tokens.next()) else {
            return Err(anyhow!(
                "malformed tool row at line {}: '{}'",
                index + 1,
                line.trim_end()
            ));
        };
        records.push(ToolRecord::new(package_id, version));
    }
    Ok(records)
}
