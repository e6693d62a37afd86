//! Integration tests for the Tidemark CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get the tidemark binary
#[allow(deprecated)]
fn tidemark_cmd() -> Command {
    let mut cmd = Command::cargo_bin("tidemark").unwrap();
    // Tests must not pick up a target from the environment.
    cmd.env_remove("DATABASE_URL");
    cmd
}

#[test]
fn test_help_command() {
    tidemark_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Apply ordered SQL migrations"))
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("execute"))
        .stdout(predicate::str::contains("split"));
}

#[test]
fn test_version_flag() {
    tidemark_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_apply_help() {
    tidemark_cmd()
        .args(["apply", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("file-name order"))
        .stdout(predicate::str::contains("--strict"))
        .stdout(predicate::str::contains("--timeout"));
}

#[test]
fn test_split_statements_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let sql_path = temp_dir.path().join("schema.sql");

    let sql = "CREATE TABLE t (name text DEFAULT 'a;b');\n\
               DO $fn$ BEGIN; PERFORM 1; END $fn$;\n";
    fs::write(&sql_path, sql).unwrap();

    tidemark_cmd()
        .args(["split", sql_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Statement 1"))
        .stdout(predicate::str::contains("Statement 2"))
        .stdout(predicate::str::contains("2 statements"))
        .stdout(predicate::str::contains("PERFORM 1"));
}

#[test]
fn test_split_comment_only_file() {
    let temp_dir = TempDir::new().unwrap();
    let sql_path = temp_dir.path().join("empty.sql");
    fs::write(&sql_path, "-- nothing to run\n").unwrap();

    tidemark_cmd()
        .args(["split", sql_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No statements found"));
}

#[test]
fn test_split_missing_file() {
    tidemark_cmd()
        .args(["split", "/nonexistent/path.sql"])
        .assert()
        .failure();
}

#[test]
fn test_execute_requires_sql_input() {
    let temp_dir = TempDir::new().unwrap();

    tidemark_cmd()
        .current_dir(temp_dir.path())
        .arg("execute")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must provide SQL"));
}

#[test]
fn test_execute_requires_a_target_url() {
    let temp_dir = TempDir::new().unwrap();

    tidemark_cmd()
        .current_dir(temp_dir.path())
        .args(["execute", "--sql", "SELECT 1;", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no target URL"));
}

#[test]
fn test_apply_rejects_unsupported_url_scheme() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("migrations")).unwrap();

    tidemark_cmd()
        .current_dir(temp_dir.path())
        .args(["apply", "--url", "mysql://localhost/app"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported target URL scheme"));
}

#[test]
fn test_apply_requires_a_target_url() {
    let temp_dir = TempDir::new().unwrap();

    tidemark_cmd()
        .current_dir(temp_dir.path())
        .arg("apply")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no target URL"));
}

#[test]
fn test_invalid_command() {
    tidemark_cmd()
        .arg("not_a_command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}
