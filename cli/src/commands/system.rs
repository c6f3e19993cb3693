//! `povfab known-host` and `ensure-user`.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::RemoteShell as _;
use crate::application::services::system::{self, DEFAULT_KNOWN_HOSTS};

/// Arguments for `known-host`.
#[derive(Args)]
pub struct KnownHostArgs {
    /// Full known_hosts line, e.g. "github.com ssh-ed25519 AAAA..."
    pub key: String,

    /// known_hosts file on the instance
    #[arg(long, default_value = DEFAULT_KNOWN_HOSTS, value_name = "PATH")]
    pub file: String,
}

/// Arguments for `ensure-user`.
#[derive(Args)]
pub struct UserArgs {
    /// System user to create
    pub user: String,
}

/// Run `known-host`.
pub async fn known_host(app: &AppContext, args: &KnownHostArgs) -> Result<()> {
    let shell = app.shell("known-host")?;
    let outcome = system::ensure_known_host(&shell, &args.key, &args.file).await?;
    app.report(shell.host(), &format!("host key in {}", args.file), outcome)
}

/// Run `ensure-user`.
pub async fn ensure_user(app: &AppContext, args: &UserArgs) -> Result<()> {
    let shell = app.shell("ensure-user")?;
    let outcome = system::ensure_user(&shell, &args.user).await?;
    app.report(shell.host(), &format!("user {}", args.user), outcome)
}
