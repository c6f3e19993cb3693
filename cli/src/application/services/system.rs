//! System accounts and SSH known-hosts entries.

use anyhow::Result;

use crate::application::ports::RemoteShell;
use crate::application::services::Outcome;
use crate::application::services::remote::{append, exists, probe, run};
use crate::domain::RemoteCommand;
use crate::domain::remote_path::dirname;

/// Default known-hosts file managed by [`ensure_known_host`].
pub const DEFAULT_KNOWN_HOSTS: &str = "/root/.ssh/known_hosts";

/// Make sure `host_key` is a line of `known_hosts`, creating the file (and a
/// mode-700 parent directory) when missing.
pub async fn ensure_known_host(
    shell: &impl RemoteShell,
    host_key: &str,
    known_hosts: &str,
) -> Result<Outcome> {
    if !exists(shell, known_hosts, true).await? {
        let dir = dirname(known_hosts);
        if !exists(shell, dir, true).await? {
            run(shell, RemoteCommand::new(["install", "-d", "-m700", dir]).sudo()).await?;
        }
        run(shell, RemoteCommand::new(["touch", known_hosts]).sudo()).await?;
    }
    let outcome = append(shell, known_hosts, host_key, true).await?;
    if outcome == Outcome::Changed {
        tracing::info!(host = shell.host(), file = known_hosts, "added host key");
    }
    Ok(outcome)
}

/// Create system user `user` (with its own group) unless it exists.
pub async fn ensure_user(shell: &impl RemoteShell, user: &str) -> Result<Outcome> {
    if probe(shell, RemoteCommand::new(["id", user])).await?.succeeded() {
        tracing::debug!(host = shell.host(), user, "user exists");
        return Ok(Outcome::Unchanged);
    }
    tracing::info!(host = shell.host(), user, "creating system user");
    run(
        shell,
        RemoteCommand::new([
            "adduser",
            "--system",
            "--group",
            "--disabled-password",
            "--quiet",
            user,
        ])
        .sudo_as("root"),
    )
    .await?;
    Ok(Outcome::Changed)
}
