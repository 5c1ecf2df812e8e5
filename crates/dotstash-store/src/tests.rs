use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use super::*;

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

fn test_dir() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system time")
        .as_nanos();
    let sequence = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut path = std::env::temp_dir();
    path.push(format!(
        "dotstash-store-tests-{}-{}-{}",
        std::process::id(),
        nanos,
        sequence
    ));
    fs::create_dir_all(&path).expect("must create test dir");
    path
}

fn sample_records() -> Vec<ToolRecord> {
    vec![
        ToolRecord::new("dotnet-ef", "9.0.0"),
        ToolRecord::new("dotnetsay", "2.1.7"),
    ]
}

#[test]
fn write_then_read_round_trips() {
    let dir = test_dir();
    let path = dir.join("tool-versions");

    write_manifest(&path, &sample_records()).expect("must write manifest");
    let records = read_manifest(&path).expect("must read manifest");

    assert_eq!(records, Some(sample_records()));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn read_missing_manifest_is_none() {
    let dir = test_dir();
    let path = dir.join("tool-versions");

    let records = read_manifest(&path).expect("missing file must not error");

    assert_eq!(records, None);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn read_empty_manifest_is_an_empty_list() {
    let dir = test_dir();
    let path = dir.join("tool-versions");
    fs::write(&path, "").expect("must seed empty manifest");

    let records = read_manifest(&path).expect("empty file must read");

    assert_eq!(records, Some(Vec::new()));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn read_reports_malformed_row_with_the_path() {
    let dir = test_dir();
    let path = dir.join("tool-versions");
    fs::write(&path, "dotnet-ef\t9.0.0\nbroken\n").expect("must seed manifest");

    let err = read_manifest(&path).expect_err("truncated row must fail");
    let message = format!("{err:#}");

    assert!(
        message.contains(&path.display().to_string()),
        "unexpected message: {message}"
    );
    assert!(message.contains("broken"), "unexpected message: {message}");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn write_rejects_a_missing_parent_for_an_explicit_path() {
    let dir = test_dir();
    let path = dir.join("missing").join("tool-versions");

    let err = write_manifest(&path, &sample_records()).expect_err("missing parent must fail");

    assert!(format!("{err:#}").contains("failed to stage manifest write"));
    assert!(!path.exists());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn write_creates_the_parent_for_the_default_location() {
    let dir = test_dir();
    let default = dir.join(".config").join(MANIFEST_FILE_NAME);

    write_manifest_with_default(&default, &sample_records(), Some(&default))
        .expect("default-location write must create its dir");

    assert_eq!(
        read_manifest(&default).expect("must read"),
        Some(sample_records())
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn successful_write_leaves_no_staged_file() {
    let dir = test_dir();
    let path = dir.join("tool-versions");

    write_manifest(&path, &sample_records()).expect("must write manifest");

    let entries = fs::read_dir(&dir)
        .expect("must list test dir")
        .collect::<Result<Vec<_>, _>>()
        .expect("entries must be readable");
    assert_eq!(entries.len(), 1, "only the manifest itself should remain");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn write_replaces_previous_contents_wholesale() {
    let dir = test_dir();
    let path = dir.join("tool-versions");
    write_manifest(&path, &sample_records()).expect("must write manifest");

    let shrunk = vec![ToolRecord::new("dotnetsay", "2.1.8")];
    write_manifest(&path, &shrunk).expect("must rewrite manifest");

    assert_eq!(read_manifest(&path).expect("must read"), Some(shrunk));
    let _ = fs::remove_dir_all(&dir);
}
