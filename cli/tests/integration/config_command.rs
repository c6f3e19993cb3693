//! Integration tests for `povfab config`.

#![allow(clippy::expect_used)]

use predicates::prelude::*;

use crate::cli_tests::povfab;

#[test]
fn test_config_show_prints_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    povfab()
        .env("POVFAB_CONFIG", dir.path().join("config.yaml"))
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ssh.forward_agent"))
        .stdout(predicate::str::contains("C.UTF-8"));
}

#[test]
fn test_config_set_persists_value() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.yaml");
    povfab()
        .env("POVFAB_CONFIG", &path)
        .args(["config", "set", "ssh.connect_timeout", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set ssh.connect_timeout = 5"));

    let output = povfab()
        .env("POVFAB_CONFIG", &path)
        .args(["--json", "config", "show"])
        .output()
        .expect("runs");
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["ssh"]["connect_timeout"], 5);
    assert_eq!(value["ssh"]["forward_agent"], true);
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    povfab()
        .env("POVFAB_CONFIG", dir.path().join("config.yaml"))
        .args(["config", "set", "ssh.port", "22"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown setting: ssh.port"))
        .stderr(predicate::str::contains("remote.locale"));
}

#[test]
fn test_config_set_rejects_invalid_value() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.yaml");
    povfab()
        .env("POVFAB_CONFIG", &path)
        .args(["config", "set", "ssh.forward_agent", "maybe"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid value for ssh.forward_agent"));
    assert!(!path.exists(), "rejected value must not be saved");
}

#[test]
fn test_config_works_without_inventory() {
    let dir = tempfile::tempdir().expect("tempdir");
    povfab()
        .env("POVFAB_CONFIG", dir.path().join("config.yaml"))
        .arg("--inventory")
        .arg(dir.path().join("missing.yaml"))
        .args(["config", "show"])
        .assert()
        .success();
}
