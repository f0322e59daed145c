//! CLI tests for supportconfig-split.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn splitter_cmd() -> Command {
    cargo_bin_cmd!("supportconfig-split")
}

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_split_writes_files() {
    let out = tempdir().unwrap();

    splitter_cmd()
        .arg("split")
        .arg(fixture_path("basic-environment.txt"))
        .arg("--output")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Files: 3"))
        .stdout(predicate::str::contains("Skipped: 1"));

    assert!(out.path().join("etc/os-release").is_file());
    assert!(out.path().join("var/log/nodes/logname.log").is_file());
}

#[test]
fn test_split_json_summary() {
    let out = tempdir().unwrap();

    let output = splitter_cmd()
        .arg("split")
        .arg(fixture_path("basic-environment.txt"))
        .arg("-o")
        .arg(out.path())
        .arg("--json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["sections"], 7);
    assert_eq!(summary["files_written"].as_array().unwrap().len(), 3);
    assert_eq!(summary["skipped"].as_array().unwrap().len(), 1);
}

#[test]
fn test_split_reads_stdin() {
    let out = tempdir().unwrap();

    splitter_cmd()
        .args(["split", "-", "--flatten", "-o"])
        .arg(out.path())
        .write_stdin("#==[ Log File ]====#\n# /var/log/warn - Last 2 Lines\na\nb\n")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(out.path().join("var_log_warn")).unwrap(),
        "a\nb\n"
    );
}

#[test]
fn test_split_exclude() {
    let out = tempdir().unwrap();

    splitter_cmd()
        .arg("split")
        .arg(fixture_path("basic-environment.txt"))
        .arg("-o")
        .arg(out.path())
        .args(["--exclude", "/var/log"])
        .assert()
        .success();

    assert!(out.path().join("etc/os-release").is_file());
    assert!(!out.path().join("var").exists());
}

#[test]
fn test_split_corrupt_report_fails() {
    let out = tempdir().unwrap();

    splitter_cmd()
        .arg("split")
        .arg(fixture_path("corrupt.txt"))
        .arg("-o")
        .arg(out.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid entry"));
}

#[test]
fn test_split_missing_report_fails() {
    let out = tempdir().unwrap();

    splitter_cmd()
        .args(["split", "does-not-exist.txt", "-o"])
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_split_output_is_file_fails() {
    let tmp = tempdir().unwrap();
    let file = tmp.path().join("taken");
    fs::write(&file, "x").unwrap();

    splitter_cmd()
        .arg("split")
        .arg(fixture_path("basic-environment.txt"))
        .arg("-o")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}
