// tests/cli_test.rs
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_release_flags() {
    Command::cargo_bin("tpg-release")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--ga"))
        .stdout(predicate::str::contains("--beta"))
        .stdout(predicate::str::contains("--commit-sha"))
        .stdout(predicate::str::contains("--release-version"))
        .stdout(predicate::str::contains("--prev-release-version"))
        .stdout(predicate::str::contains("--log-level"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("tpg-release")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_config_file_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");

    Command::cargo_bin("tpg-release")
        .unwrap()
        .args(["--config", missing.to_str().unwrap(), "--ga"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error loading config"));
}
