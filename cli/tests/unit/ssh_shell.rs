//! Tests for the OpenSSH `RemoteShell` adapter.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use anyhow::bail;
use povfab_cli::application::ports::RemoteShell;
use povfab_cli::domain::{RemoteCommand, SshConfig};
use povfab_cli::infra::ssh::SshShell;

use crate::helpers::{MockCommandRunner, err_output, ok_output};

const TIMEOUT: Duration = Duration::from_secs(42);

fn shell(runner: &MockCommandRunner, ssh: SshConfig) -> SshShell<MockCommandRunner> {
    SshShell::new(runner.clone(), "deploy@prod.example.com", ssh, TIMEOUT)
}

#[tokio::test]
async fn test_invokes_ssh_in_batch_mode_with_agent_forwarding() {
    let runner = MockCommandRunner::returning(|| Ok(ok_output(b"")));
    let command = RemoteCommand::new(["apt-get", "update", "-qq"]).sudo();
    shell(&runner, SshConfig::default())
        .execute(&command)
        .await
        .expect("ok");

    let calls = runner.recorded_calls();
    assert_eq!(calls.len(), 1);
    let (program, args, timeout) = &calls[0];
    assert_eq!(program, "ssh");
    assert_eq!(
        args,
        &[
            "-A",
            "-o",
            "BatchMode=yes",
            "-o",
            "ConnectTimeout=10",
            "--",
            "deploy@prod.example.com",
            "sudo -H -- sh -c 'apt-get update -qq'",
        ]
    );
    assert_eq!(*timeout, TIMEOUT);
}

#[tokio::test]
async fn test_agent_forwarding_can_be_disabled_and_options_added() {
    let runner = MockCommandRunner::returning(|| Ok(ok_output(b"")));
    let ssh = SshConfig {
        forward_agent: false,
        connect_timeout: 3,
        options: vec!["StrictHostKeyChecking=accept-new".to_string()],
    };
    shell(&runner, ssh)
        .execute(&RemoteCommand::new(["true"]))
        .await
        .expect("ok");
    let (_, args, _) = &runner.recorded_calls()[0];
    assert!(!args.iter().any(|a| a == "-A"));
    assert_eq!(
        args[..6],
        [
            "-o",
            "BatchMode=yes",
            "-o",
            "ConnectTimeout=3",
            "-o",
            "StrictHostKeyChecking=accept-new"
        ]
    );
}

#[tokio::test]
async fn test_output_is_converted_without_raising_on_exit_code() {
    let runner = MockCommandRunner::returning(|| Ok(err_output(1, b"id: 'www': no such user\n")));
    let out = shell(&runner, SshConfig::default())
        .execute(&RemoteCommand::new(["id", "www"]).quiet())
        .await
        .expect("non-zero exit is data");
    assert_eq!(out.code, Some(1));
    assert_eq!(out.stderr, "id: 'www': no such user\n");
    assert!(!out.succeeded());
}

#[tokio::test]
async fn test_stdout_is_captured() {
    let runner = MockCommandRunner::returning(|| Ok(ok_output(b"install ok installed")));
    let out = shell(&runner, SshConfig::default())
        .execute(&RemoteCommand::new(["dpkg-query", "-W", "nginx"]))
        .await
        .expect("ok");
    assert_eq!(out.stdout_trimmed(), "install ok installed");
}

#[tokio::test]
async fn test_spawn_failure_is_an_error_naming_host() {
    let runner = MockCommandRunner::returning(|| bail!("failed to spawn ssh"));
    let err = shell(&runner, SshConfig::default())
        .execute(&RemoteCommand::new(["true"]))
        .await
        .expect_err("transport failure");
    let chain = format!("{err:#}");
    assert!(chain.contains("deploy@prod.example.com"), "{chain}");
    assert!(chain.contains("failed to spawn ssh"), "{chain}");
}

#[test]
fn test_host_is_reported() {
    let runner = MockCommandRunner::returning(|| Ok(ok_output(b"")));
    assert_eq!(shell(&runner, SshConfig::default()).host(), "deploy@prod.example.com");
}
