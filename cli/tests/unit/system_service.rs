//! Tests for known-hosts entries and system users.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use povfab_cli::application::Outcome;
use povfab_cli::application::services::system::{
    DEFAULT_KNOWN_HOSTS, ensure_known_host, ensure_user,
};
use povfab_cli::domain::{Body, CommandOutput, Privilege, RemoteCommand};

use crate::helpers::{FakeShell, file_backed_shell, program, words};

const GITHUB_KEY: &str = "github.com ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOMqqnkVzrm0SdG6UOoqKLsabgH5C9okWi0dh2l9GKJl";

#[tokio::test]
async fn test_present_key_is_left_alone() {
    let (shell, file) = file_backed_shell(DEFAULT_KNOWN_HOSTS, Some(&[GITHUB_KEY]));
    let outcome = ensure_known_host(&shell, GITHUB_KEY, DEFAULT_KNOWN_HOSTS)
        .await
        .expect("ok");
    assert_eq!(outcome, Outcome::Unchanged);
    assert!(shell.mutating().is_empty());
    assert_eq!(file.lock().unwrap().as_deref(), Some(&[GITHUB_KEY.to_string()][..]));
}

#[tokio::test]
async fn test_missing_file_is_created_then_appended() {
    let (shell, file) = file_backed_shell(DEFAULT_KNOWN_HOSTS, None);
    let outcome = ensure_known_host(&shell, GITHUB_KEY, DEFAULT_KNOWN_HOSTS)
        .await
        .expect("ok");
    assert_eq!(outcome, Outcome::Changed);
    let programs: Vec<String> = shell.mutating().iter().map(program).collect();
    assert_eq!(programs, ["touch", "printf"]);
    assert_eq!(
        file.lock().unwrap().clone(),
        Some(vec![GITHUB_KEY.to_string()])
    );
}

#[tokio::test]
async fn test_second_run_appends_nothing() {
    let (shell, file) = file_backed_shell(DEFAULT_KNOWN_HOSTS, None);
    ensure_known_host(&shell, GITHUB_KEY, DEFAULT_KNOWN_HOSTS)
        .await
        .expect("first");
    let second = ensure_known_host(&shell, GITHUB_KEY, DEFAULT_KNOWN_HOSTS)
        .await
        .expect("second");
    assert_eq!(second, Outcome::Unchanged);
    assert_eq!(file.lock().unwrap().as_ref().map(Vec::len), Some(1));
    let appends = shell
        .calls()
        .iter()
        .filter(|c| program(c) == "printf")
        .count();
    assert_eq!(appends, 1);
}

#[tokio::test]
async fn test_missing_directory_is_created_private() {
    let shell = FakeShell::new(|command: &RemoteCommand| match program(command).as_str() {
        "test" | "grep" => CommandOutput::failed(1, ""),
        _ => CommandOutput::ok(""),
    });
    ensure_known_host(&shell, GITHUB_KEY, "/home/deploy/.ssh/known_hosts")
        .await
        .expect("ok");
    let mutating: Vec<Vec<String>> = shell.mutating().iter().map(words).collect();
    assert_eq!(mutating[0], ["install", "-d", "-m700", "/home/deploy/.ssh"]);
    assert_eq!(mutating[1], ["touch", "/home/deploy/.ssh/known_hosts"]);
    assert_eq!(mutating[2][0], "printf");
    assert!(
        shell
            .mutating()
            .iter()
            .all(|c| c.privilege() == &Privilege::Superuser)
    );
}

#[tokio::test]
async fn test_append_runs_through_command_interpreter() {
    let (shell, _) = file_backed_shell(DEFAULT_KNOWN_HOSTS, Some(&[]));
    ensure_known_host(&shell, GITHUB_KEY, DEFAULT_KNOWN_HOSTS)
        .await
        .expect("ok");
    let append = shell.mutating().pop().expect("append");
    assert!(matches!(append.body(), Body::Script(_)));
    assert!(append.render().starts_with("sudo -H -- sh -c "));
}

#[tokio::test]
async fn test_existing_user_is_not_recreated() {
    let shell = FakeShell::succeeding();
    let outcome = ensure_user(&shell, "www").await.expect("ok");
    assert_eq!(outcome, Outcome::Unchanged);
    assert_eq!(shell.programs(), ["id"]);
    assert!(shell.calls()[0].is_quiet());
}

#[tokio::test]
async fn test_missing_user_is_created_as_root() {
    let shell = FakeShell::new(|command: &RemoteCommand| match program(command).as_str() {
        "id" => CommandOutput::failed(1, "id: 'www': no such user"),
        _ => CommandOutput::ok(""),
    });
    let outcome = ensure_user(&shell, "www").await.expect("ok");
    assert_eq!(outcome, Outcome::Changed);
    let adduser = shell.mutating().pop().expect("adduser");
    assert_eq!(
        words(&adduser),
        ["adduser", "--system", "--group", "--disabled-password", "--quiet", "www"]
    );
    assert_eq!(adduser.privilege(), &Privilege::As("root".to_string()));
}
