//! `povfab pg-user` and `pg-db`.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::RemoteShell as _;
use crate::application::services::postgres;

/// Arguments for `pg-user`.
#[derive(Args)]
pub struct PgUserArgs {
    /// Role name
    pub name: String,
}

/// Arguments for `pg-db`.
#[derive(Args)]
pub struct PgDbArgs {
    /// Database name
    pub name: String,

    /// Owning role
    #[arg(long)]
    pub owner: String,
}

/// Run `pg-user`.
pub async fn user(app: &AppContext, args: &PgUserArgs) -> Result<()> {
    let shell = app.shell("pg-user")?;
    let outcome =
        postgres::ensure_postgresql_user(&shell, &args.name, &app.config.remote.locale).await?;
    app.report(shell.host(), &format!("role {}", args.name), outcome)
}

/// Run `pg-db`.
pub async fn db(app: &AppContext, args: &PgDbArgs) -> Result<()> {
    let shell = app.shell("pg-db")?;
    let outcome = postgres::ensure_postgresql_db(
        &shell,
        &args.name,
        &args.owner,
        &app.config.remote.locale,
    )
    .await?;
    app.report(
        shell.host(),
        &format!("database {} owned by {}", args.name, args.owner),
        outcome,
    )
}
