//! Generic remote primitives built on the [`RemoteShell`] port: checked
//! execution, quiet probes, path existence and idempotent line append.

use anyhow::Result;

use crate::application::ports::RemoteShell;
use crate::application::services::Outcome;
use crate::domain::{CommandOutput, RemoteCommand, RemoteError};

/// Run a mutating command and return its stdout.
///
/// # Errors
///
/// Returns [`RemoteError::CommandFailed`] if the command exits non-zero, or
/// the shell's error if it could not be delivered.
pub async fn run(shell: &impl RemoteShell, command: RemoteCommand) -> Result<String> {
    let output = shell.execute(&command).await?;
    if !output.succeeded() {
        return Err(RemoteError::CommandFailed {
            host: shell.host().to_string(),
            command: command.to_string(),
            code: output.code,
            stderr: output.stderr.trim().to_string(),
        }
        .into());
    }
    Ok(output.stdout)
}

/// Run a read-only command quietly; a non-zero exit is returned, not raised.
pub async fn probe(shell: &impl RemoteShell, command: RemoteCommand) -> Result<CommandOutput> {
    shell.execute(&command.quiet()).await
}

/// Whether `path` exists on the remote host.
pub async fn exists(shell: &impl RemoteShell, path: &str, use_sudo: bool) -> Result<bool> {
    let output = probe(shell, RemoteCommand::new(["test", "-e", path]).sudo_if(use_sudo)).await?;
    Ok(output.succeeded())
}

/// Whether `path` holds `line` as a complete line.
///
/// Runs through `sh -c` so it behaves the same under `sudo` as the append
/// that follows it.
pub async fn contains(
    shell: &impl RemoteShell,
    path: &str,
    line: &str,
    use_sudo: bool,
) -> Result<bool> {
    let script = format!(
        "grep -qxF -- {} {}",
        shell_words::quote(line),
        shell_words::quote(path)
    );
    let output = probe(shell, RemoteCommand::script(script).sudo_if(use_sudo)).await?;
    Ok(output.succeeded())
}

/// Append `line` to `path` unless it is already present.
///
/// Both the check and the write go through a command interpreter.
pub async fn append(
    shell: &impl RemoteShell,
    path: &str,
    line: &str,
    use_sudo: bool,
) -> Result<Outcome> {
    if contains(shell, path, line, use_sudo).await? {
        tracing::debug!(host = shell.host(), path, "line already present");
        return Ok(Outcome::Unchanged);
    }
    let script = format!(
        "printf '%s\\n' {} >> {}",
        shell_words::quote(line),
        shell_words::quote(path)
    );
    run(shell, RemoteCommand::script(script).sudo_if(use_sudo)).await?;
    Ok(Outcome::Changed)
}
