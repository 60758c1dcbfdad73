//! Command-line behavior tests
//!
//! A successful run schedules passes forever, so only terminating paths
//! (argument errors and a fatal first pass) are exercised here.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mirra() -> Command {
    Command::cargo_bin("mirra").expect("mirra binary should build")
}

#[test]
fn test_no_arguments_fails_with_usage_error() {
    mirra()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Source directory is required"));
}

#[test]
fn test_missing_source_exits_nonzero_without_touching_replica() {
    let workdir = TempDir::new().expect("create tempdir");
    let replica = workdir.path().join("replica");

    mirra()
        .current_dir(workdir.path())
        .arg(workdir.path().join("never-existed"))
        .arg(&replica)
        .arg("--log-dir")
        .arg(workdir.path().join("log"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Source directory does not exist"));

    assert!(
        !replica.exists(),
        "a fatal first pass must not create the replica root"
    );
}

#[test]
fn test_missing_source_is_recorded_in_the_journal() {
    let workdir = TempDir::new().expect("create tempdir");
    let log_dir = workdir.path().join("log");

    mirra()
        .current_dir(workdir.path())
        .arg(workdir.path().join("never-existed"))
        .arg(workdir.path().join("replica"))
        .arg("--log-dir")
        .arg(&log_dir)
        .assert()
        .failure();

    let journal = std::fs::read_to_string(log_dir.join("mirra.log"))
        .expect("journal should exist after a fatal pass");
    assert!(journal.contains("Pass aborted:"));
    assert!(journal.contains("never-existed"));
}

#[test]
fn test_same_source_and_replica_rejected() {
    let workdir = TempDir::new().expect("create tempdir");

    mirra()
        .arg(workdir.path())
        .arg(workdir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be the same"));
}

#[test]
fn test_zero_interval_rejected() {
    let workdir = TempDir::new().expect("create tempdir");

    mirra()
        .arg(workdir.path().join("src"))
        .arg(workdir.path().join("dst"))
        .arg("--interval")
        .arg("0")
        .assert()
        .failure();
}

#[test]
fn test_help_describes_the_tool() {
    mirra()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("mirroring"))
        .stdout(predicate::str::contains("--delete"));
}

#[test]
fn test_version_flag() {
    mirra()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
