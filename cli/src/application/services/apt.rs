//! Debian package management: index freshness, presence checks, installs.

use anyhow::Result;

use crate::application::ports::RemoteShell;
use crate::application::services::Outcome;
use crate::application::services::remote::{probe, run};
use crate::domain::{InstallOptions, PackageList, RemoteCommand};

/// Directory whose mtime tracks the last `apt-get update`.
pub const APT_LISTS_DIR: &str = "/var/lib/apt/lists";

const INSTALLED_STATUS: &str = "install ok installed";

/// Run `apt-get update` unless it already ran within the last day.
pub async fn ensure_apt_not_outdated(shell: &impl RemoteShell) -> Result<Outcome> {
    let fresh = probe(
        shell,
        RemoteCommand::new(["find", APT_LISTS_DIR, "-maxdepth", "0", "-mtime", "-1"]),
    )
    .await?;
    if !fresh.stdout_trimmed().is_empty() {
        tracing::debug!(host = shell.host(), "package index is fresh");
        return Ok(Outcome::Unchanged);
    }
    tracing::info!(host = shell.host(), "refreshing package index");
    run(shell, RemoteCommand::new(["apt-get", "update", "-qq"]).sudo()).await?;
    Ok(Outcome::Changed)
}

/// Whether package `name` is installed.
///
/// One round trip per package; checking many packages this way is slow.
pub async fn package_installed(shell: &impl RemoteShell, name: &str) -> Result<bool> {
    let output = probe(
        shell,
        RemoteCommand::new(["dpkg-query", "-W", "-f=${Status}", "--", name]),
    )
    .await?;
    Ok(output.succeeded() && output.stdout_trimmed() == INSTALLED_STATUS)
}

/// Install `packages` with a single `apt-get install`.
///
/// Returns the packages that were handed to `apt-get`; an empty list means
/// nothing was run.
pub async fn install_packages(
    shell: &impl RemoteShell,
    packages: impl Into<PackageList>,
    options: InstallOptions,
) -> Result<PackageList> {
    let requested: PackageList = packages.into();
    let wanted = if options.missing_only {
        let mut missing = Vec::with_capacity(requested.len());
        for name in requested.iter() {
            if package_installed(shell, name).await? {
                tracing::debug!(host = shell.host(), package = name, "already installed");
            } else {
                missing.push(name);
            }
        }
        missing.into_iter().collect()
    } else {
        requested
    };

    if wanted.is_empty() {
        return Ok(wanted);
    }

    ensure_apt_not_outdated(shell).await?;

    let mut argv = vec!["apt-get", "install", "-qq", "-y", "--"];
    argv.extend(wanted.iter());
    let mut command = RemoteCommand::new(argv).sudo();
    if !options.interactive {
        command = command.env("DEBIAN_FRONTEND", "noninteractive");
    }
    tracing::info!(host = shell.host(), packages = ?wanted.as_slice(), "installing packages");
    run(shell, command).await?;
    Ok(wanted)
}
