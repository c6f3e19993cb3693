//! `povfab changelog` — record an admin changelog entry.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::RemoteShell as _;
use crate::application::services::changelog::{self, ChangelogOptions};
use crate::domain::message::parse_values;

/// Arguments for `changelog`.
#[derive(Args)]
pub struct ChangelogArgs {
    /// Entry text; `{name}` placeholders are filled from --var
    pub message: String,

    /// Add to the latest entry instead of starting a new one
    #[arg(long)]
    pub append: bool,

    /// Fail when the changelog tool is not installed
    #[arg(long)]
    pub required: bool,

    /// Placeholder value as key=value
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,
}

/// Run `changelog`.
pub async fn run(app: &AppContext, args: &ChangelogArgs) -> Result<()> {
    let values = if args.vars.is_empty() {
        None
    } else {
        Some(parse_values(&args.vars)?)
    };
    let options = ChangelogOptions {
        append: args.append,
        optional: !args.required,
        values,
    };
    let shell = app.shell("changelog")?;
    let outcome = changelog::changelog(&shell, &args.message, &options).await?;
    app.report(shell.host(), "changelog entry", outcome)
}
