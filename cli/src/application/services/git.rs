//! Clone or update a git checkout as the superuser, reusing the operator's
//! forwarded SSH agent.

use anyhow::Result;

use crate::application::ports::RemoteShell;
use crate::application::services::remote::{exists, probe, run};
use crate::domain::remote_path::join;
use crate::domain::{GitError, RemoteCommand};

/// Branch that `--force` resets to when none is given.
pub const DEFAULT_BRANCH: &str = "master";

/// Clone `repo` into `work_dir`, or with `force` fetch and hard-reset an
/// existing checkout to `origin/<branch>`. Returns `git describe --always`.
///
/// # Errors
///
/// - [`GitError::DestinationExists`] when `work_dir` is already a checkout
///   and `force` is not set. Nothing is fetched in that case.
/// - [`GitError::EmptyDescriptor`] when `git describe` prints nothing.
/// - Any failing git command.
pub async fn git_clone(
    shell: &impl RemoteShell,
    repo: &str,
    work_dir: &str,
    force: bool,
    branch: &str,
) -> Result<String> {
    // sudo drops the login user's environment, so the agent socket has to be
    // read first and handed back explicitly.
    let socket = probe(shell, RemoteCommand::script("echo $SSH_AUTH_SOCK"))
        .await?
        .stdout_trimmed()
        .to_string();
    if socket.is_empty() {
        tracing::warn!(
            host = shell.host(),
            "SSH_AUTH_SOCK is empty on the remote side; is agent forwarding enabled?"
        );
    }
    let with_agent = |command: RemoteCommand| {
        let command = command.sudo();
        if socket.is_empty() {
            command
        } else {
            command.env("SSH_AUTH_SOCK", socket.as_str())
        }
    };

    if exists(shell, &join(work_dir, ".git"), true).await? {
        if !force {
            return Err(GitError::DestinationExists(work_dir.to_string()).into());
        }
        tracing::info!(host = shell.host(), dir = work_dir, branch, "updating checkout");
        run(
            shell,
            with_agent(RemoteCommand::new(["git", "fetch"]).current_dir(work_dir)),
        )
        .await?;
        let target = format!("origin/{branch}");
        run(
            shell,
            with_agent(
                RemoteCommand::new(["git", "reset", "--hard", target.as_str()])
                    .current_dir(work_dir),
            ),
        )
        .await?;
    } else {
        tracing::info!(host = shell.host(), repo, dir = work_dir, "cloning");
        run(
            shell,
            with_agent(RemoteCommand::new(["git", "clone", "--", repo, work_dir])),
        )
        .await?;
    }

    let described = run(
        shell,
        RemoteCommand::new(["git", "describe", "--always"])
            .current_dir(work_dir)
            .sudo(),
    )
    .await?;
    let descriptor = described.trim();
    if descriptor.is_empty() {
        return Err(GitError::EmptyDescriptor(work_dir.to_string()).into());
    }
    Ok(descriptor.to_string())
}
