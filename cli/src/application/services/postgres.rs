//! PostgreSQL roles and databases, managed through the `postgres` account.

use anyhow::Result;

use crate::application::ports::RemoteShell;
use crate::application::services::Outcome;
use crate::application::services::remote::{probe, run};
use crate::domain::RemoteCommand;
use crate::domain::postgres::{database_exists_query, role_exists_query};

/// Account that owns the cluster.
pub const POSTGRES_ACCOUNT: &str = "postgres";

async fn catalog_has(shell: &impl RemoteShell, query: String) -> Result<bool> {
    let output = probe(
        shell,
        RemoteCommand::new(["psql", "-tAc", query.as_str()]).sudo_as(POSTGRES_ACCOUNT),
    )
    .await?;
    Ok(output.succeeded() && !output.stdout_trimmed().is_empty())
}

/// Whether role `name` exists.
pub async fn postgresql_user_exists(shell: &impl RemoteShell, name: &str) -> Result<bool> {
    catalog_has(shell, role_exists_query(name)).await
}

/// Create role `name` (no createdb, no createrole, no superuser) unless it
/// exists.
pub async fn ensure_postgresql_user(
    shell: &impl RemoteShell,
    name: &str,
    locale: &str,
) -> Result<Outcome> {
    if postgresql_user_exists(shell, name).await? {
        tracing::debug!(host = shell.host(), role = name, "role exists");
        return Ok(Outcome::Unchanged);
    }
    tracing::info!(host = shell.host(), role = name, "creating role");
    run(
        shell,
        RemoteCommand::new(["createuser", "-DRS", name])
            .env("LC_ALL", locale)
            .sudo_as(POSTGRES_ACCOUNT),
    )
    .await?;
    Ok(Outcome::Changed)
}

/// Whether database `name` exists.
pub async fn postgresql_db_exists(shell: &impl RemoteShell, name: &str) -> Result<bool> {
    catalog_has(shell, database_exists_query(name)).await
}

/// Create UTF-8 database `name` owned by `owner` unless it exists.
pub async fn ensure_postgresql_db(
    shell: &impl RemoteShell,
    name: &str,
    owner: &str,
    locale: &str,
) -> Result<Outcome> {
    if postgresql_db_exists(shell, name).await? {
        tracing::debug!(host = shell.host(), database = name, "database exists");
        return Ok(Outcome::Unchanged);
    }
    tracing::info!(host = shell.host(), database = name, owner, "creating database");
    run(
        shell,
        RemoteCommand::new([
            "createdb", "-E", "utf-8", "-T", "template0", "-O", owner, name,
        ])
        .env("LC_ALL", locale)
        .sudo_as(POSTGRES_ACCOUNT),
    )
    .await?;
    Ok(Outcome::Changed)
}
