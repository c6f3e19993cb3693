//! `povfab apt-update`, `package-installed` and `install`.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::RemoteShell as _;
use crate::application::services::{Outcome, apt};
use crate::domain::InstallOptions;
use crate::output::json;

/// Arguments for `package-installed`.
#[derive(Args)]
pub struct PackageArgs {
    /// Debian package name
    pub package: String,
}

/// Arguments for `install`.
#[derive(Args)]
pub struct InstallArgs {
    /// Packages to install (space-separated lists are split)
    #[arg(required = true)]
    pub packages: Vec<String>,

    /// Install option as key=value (missing_only, interactive)
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,
}

/// Run `apt-update`.
pub async fn update(app: &AppContext) -> Result<()> {
    let shell = app.shell("apt-update")?;
    let outcome = apt::ensure_apt_not_outdated(&shell).await?;
    app.report(shell.host(), "package index refreshed", outcome)
}

/// Run `package-installed`.
pub async fn installed(app: &AppContext, args: &PackageArgs) -> Result<()> {
    let shell = app.shell("package-installed")?;
    let installed = apt::package_installed(&shell, &args.package).await?;
    if app.is_json() {
        app.output.raw(&json::to_pretty(&serde_json::json!({
            "host": shell.host(),
            "package": args.package,
            "installed": installed,
        }))?);
    } else if installed {
        app.output.success(&format!("{} is installed", args.package));
    } else {
        app.output.warn(&format!("{} is not installed", args.package));
    }
    Ok(())
}

/// Run `install`.
pub async fn install(app: &AppContext, args: InstallArgs) -> Result<()> {
    let options = InstallOptions::parse_assignments(&args.options)?;
    let shell = app.shell("install")?;
    let installed = apt::install_packages(&shell, args.packages, options).await?;
    if installed.is_empty() {
        return app.report(shell.host(), "packages installed", Outcome::Unchanged);
    }
    let action = format!("installed {}", installed.as_slice().join(" "));
    app.report(shell.host(), &action, Outcome::Changed)
}
