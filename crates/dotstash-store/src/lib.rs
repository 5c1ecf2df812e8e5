use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use dotstash_core::{parse_manifest_text, render_manifest, ToolRecord};

pub const MANIFEST_FILE_NAME: &str = ".dotnet-tool-versions";

/// `<user-home>/.config/.dotnet-tool-versions`.
pub fn default_manifest_path() -> Result<PathBuf> {
    Ok(user_home()?.join(".config").join(MANIFEST_FILE_NAME))
}

fn user_home() -> Result<PathBuf> {
    if cfg!(windows) {
        let profile = std::env::var("USERPROFILE")
            .context("USERPROFILE is not set; cannot resolve the user home")?;
        return Ok(PathBuf::from(profile));
    }

    let home = std::env::var("HOME").context("HOME is not set; cannot resolve the user home")?;
    Ok(PathBuf::from(home))
}

/// Reads the manifest. `Ok(None)` means the file does not exist, which every
/// caller treats as recoverable; a file with no rows reads as `Some` of an
/// empty list.
pub fn read_manifest(path: &Path) -> Result<Option<Vec<ToolRecord>>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest: {}", path.display()))?;
    let records = parse_manifest_text(&raw)
        .with_context(|| format!("failed to parse manifest: {}", path.display()))?;
    Ok(Some(records))
}

/// Writes the manifest atomically: the full payload is staged next to the
/// target and renamed into place, so a failed write never leaves a truncated
/// file behind.
pub fn write_manifest(path: &Path, records: &[ToolRecord]) -> Result<PathBuf> {
    let default_path = default_manifest_path().ok();
    write_manifest_with_default(path, records, default_path.as_deref())
}

pub(crate) fn write_manifest_with_default(
    path: &Path,
    records: &[ToolRecord],
    default_path: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        // A missing parent is only created for the default manifest
        // location; explicitly supplied paths must already have one.
        if !parent.as_os_str().is_empty() && !parent.exists() && Some(path) == default_path {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create manifest dir: {}", parent.display()))?;
        }
    }

    let staged = staged_manifest_path(path)?;
    fs::write(&staged, render_manifest(records).as_bytes())
        .with_context(|| format!("failed to stage manifest write: {}", staged.display()))?;
    if let Err(err) = fs::rename(&staged, path) {
        let _ = fs::remove_file(&staged);
        return Err(err).with_context(|| format!("failed to replace manifest: {}", path.display()));
    }
    Ok(path.to_path_buf())
}

fn staged_manifest_path(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("manifest path has no file name: {}", path.display()))?;
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    Ok(path.with_file_name(format!(".{file_name}.{}-{nanos}.tmp", std::process::id())))
}

#[cfg(test)]
mod tests;
