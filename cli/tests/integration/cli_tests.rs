//! Integration tests for the povfab command surface.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

pub fn povfab() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("povfab"));
    cmd.env("NO_COLOR", "1")
        .env_remove("POVFAB_INVENTORY")
        .env_remove("POVFAB_LOG")
        .env("POVFAB_CONFIG", "/nonexistent/povfab-test/config.yaml");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    povfab().assert().code(2).stderr(predicate::str::contains(
        "Idempotent remote administration helpers",
    ));
}

#[test]
fn test_cli_help_lists_operations() {
    let output = povfab().arg("--help").output().expect("runs");
    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    for name in [
        "tasks",
        "instances",
        "apt-update",
        "package-installed",
        "install",
        "known-host",
        "ensure-user",
        "git-clone",
        "pg-user",
        "pg-db",
        "changelog",
        "config",
    ] {
        assert!(help.contains(name), "{name} missing from help");
    }
}

#[test]
fn test_cli_version_flag_shows_version() {
    povfab()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("povfab"));
}

#[test]
fn test_version_command_shows_version() {
    povfab()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("povfab 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let output = povfab()
        .args(["--json", "version"])
        .output()
        .expect("runs");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["version"], "0.1.0");
}

#[test]
fn test_version_ignores_broken_inventory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("povfab.yaml");
    std::fs::write(&path, "not: [valid").expect("write");
    povfab()
        .arg("--inventory")
        .arg(&path)
        .arg("version")
        .assert()
        .success();
}

#[test]
fn test_install_requires_a_package() {
    povfab()
        .args(["install"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<PACKAGES>"));
}

#[test]
fn test_pg_db_requires_owner() {
    povfab()
        .args(["pg-db", "shop"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--owner"));
}
