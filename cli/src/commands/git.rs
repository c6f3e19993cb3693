//! `povfab git-clone` — clone or update a checkout and print its descriptor.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::RemoteShell as _;
use crate::application::services::git::{self, DEFAULT_BRANCH};
use crate::output::json;

/// Arguments for `git-clone`.
#[derive(Args)]
pub struct GitCloneArgs {
    /// Repository URL, typically over SSH
    pub repo: String,

    /// Checkout directory on the instance
    pub dir: String,

    /// Fetch and hard-reset an existing checkout
    #[arg(long)]
    pub force: bool,

    /// Branch to reset to with --force
    #[arg(long, default_value = DEFAULT_BRANCH)]
    pub branch: String,
}

/// Run `git-clone`.
pub async fn run(app: &AppContext, args: &GitCloneArgs) -> Result<()> {
    if !app.config.ssh.forward_agent {
        app.output
            .warn("ssh.forward_agent is off; cloning over SSH will likely fail");
    }
    let shell = app.shell("git-clone")?;
    let descriptor = git::git_clone(&shell, &args.repo, &args.dir, args.force, &args.branch).await?;
    if app.is_json() {
        app.output.raw(&json::to_pretty(&serde_json::json!({
            "host": shell.host(),
            "dir": args.dir,
            "describe": descriptor,
        }))?);
    } else {
        app.output.raw(&descriptor);
    }
    Ok(())
}
