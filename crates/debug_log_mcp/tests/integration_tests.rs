use assert_cmd::Command;
use predicates::prelude::*;

/// Test CLI help output
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("mcp-server-debug-log").unwrap();
    let assert = cmd.arg("--help").assert();

    assert
        .success()
        .stdout(predicate::str::contains("--content-dir"))
        .stdout(predicate::str::contains("--read-only"));
}

/// Test CLI version output
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("mcp-server-debug-log").unwrap();
    let assert = cmd.arg("--version").assert();

    assert.success();
}

/// Test that a missing content directory is rejected before serving
#[test]
fn test_missing_content_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("not-there");

    let mut cmd = Command::cargo_bin("mcp-server-debug-log").unwrap();
    let assert = cmd.arg("--content-dir").arg(&missing).assert();

    assert
        .failure()
        .stderr(predicate::str::contains("DirectoryNotFound"));
}

/// Test that an unknown log format is a usage error
#[test]
fn test_invalid_log_format_fails() {
    let mut cmd = Command::cargo_bin("mcp-server-debug-log").unwrap();
    let assert = cmd.args(["--log-format", "xml"]).assert();

    assert.failure();
}
