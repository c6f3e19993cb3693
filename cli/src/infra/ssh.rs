//! Infrastructure implementation of the `RemoteShell` port over OpenSSH.
//!
//! Every command is a separate `ssh` invocation in batch mode; the rendered
//! command line is the single remote argument after `--`.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, RemoteShell};
use crate::domain::{CommandOutput, RemoteCommand, SshConfig};

/// `RemoteShell` that runs commands through the local `ssh` client.
pub struct SshShell<R: CommandRunner> {
    runner: R,
    host: String,
    ssh: SshConfig,
    timeout: Duration,
}

impl<R: CommandRunner> SshShell<R> {
    /// Shell for `host` (anything `ssh` accepts as a destination).
    pub fn new(runner: R, host: impl Into<String>, ssh: SshConfig, timeout: Duration) -> Self {
        Self {
            runner,
            host: host.into(),
            ssh,
            timeout,
        }
    }

    /// Arguments passed to `ssh` for `command`.
    #[must_use]
    pub fn ssh_args(&self, command: &RemoteCommand) -> Vec<String> {
        let mut args = Vec::new();
        if self.ssh.forward_agent {
            args.push("-A".to_string());
        }
        args.push("-o".to_string());
        args.push("BatchMode=yes".to_string());
        args.push("-o".to_string());
        args.push(format!("ConnectTimeout={}", self.ssh.connect_timeout));
        for option in &self.ssh.options {
            args.push("-o".to_string());
            args.push(option.clone());
        }
        args.push("--".to_string());
        args.push(self.host.clone());
        args.push(command.render());
        args
    }
}

impl<R: CommandRunner> RemoteShell for SshShell<R> {
    fn host(&self) -> &str {
        &self.host
    }

    async fn execute(&self, command: &RemoteCommand) -> Result<CommandOutput> {
        if command.is_quiet() {
            tracing::debug!("[{}] {}: {}", self.host, command.verb(), command);
        } else {
            tracing::info!("[{}] {}: {}", self.host, command.verb(), command);
        }

        let args = self.ssh_args(command);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = self
            .runner
            .run_with_timeout("ssh", &args, self.timeout)
            .await
            .with_context(|| format!("ssh to {}", self.host))?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        if !command.is_quiet() {
            for line in result.stdout.lines() {
                tracing::info!("[{}] out: {line}", self.host);
            }
        }
        // ssh reserves 255 for its own failures.
        if result.code == Some(255) {
            tracing::warn!(
                "[{}] ssh exited with 255: {}",
                self.host,
                result.stderr.trim()
            );
        }
        Ok(result)
    }
}
