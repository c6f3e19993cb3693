//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags};
use crate::commands;
use crate::infra::inventory::YamlInventoryFile;

/// Idempotent remote administration helpers
///
/// Leading instance names select the target host:
/// `povfab prod install nginx`.
#[derive(Parser)]
#[command(
    name = "povfab",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Inventory file declaring instances
    #[arg(long, global = true, env = "POVFAB_INVENTORY", value_name = "FILE")]
    pub inventory: Option<PathBuf>,

    /// Act on this instance (overrides selector tasks)
    #[arg(short, long, global = true, value_name = "NAME")]
    pub instance: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log every remote command, including checks
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Commands following one or more selector tasks.
#[derive(Parser)]
#[command(name = "povfab", no_binary_name = true)]
struct Tail {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List selector tasks
    Tasks,

    /// List instances from the inventory
    Instances,

    /// Refresh the package index if older than a day
    AptUpdate,

    /// Report whether a package is installed
    PackageInstalled(commands::apt::PackageArgs),

    /// Install packages
    Install(commands::apt::InstallArgs),

    /// Add a host key to a known_hosts file
    KnownHost(commands::system::KnownHostArgs),

    /// Create a system user
    EnsureUser(commands::system::UserArgs),

    /// Clone or update a git checkout
    GitClone(commands::git::GitCloneArgs),

    /// Create a PostgreSQL role
    PgUser(commands::postgres::PgUserArgs),

    /// Create a PostgreSQL database
    PgDb(commands::postgres::PgDbArgs),

    /// Record an admin changelog entry
    Changelog(commands::changelog::ChangelogArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,

    /// Selector task named after an instance
    #[command(external_subcommand)]
    External(Vec<String>),
}

impl Command {
    /// Whether the command needs the inventory.
    fn needs_inventory(&self) -> bool {
        !matches!(self, Self::Config(_) | Self::Version)
    }
}

/// Names instances may not take because they are subcommands.
#[must_use]
pub fn reserved_names() -> Vec<String> {
    let mut names: Vec<String> = Cli::command()
        .get_subcommands()
        .flat_map(|cmd| std::iter::once(cmd.get_name()).chain(cmd.get_all_aliases()))
        .map(str::to_string)
        .collect();
    names.push("help".to_string());
    names
}

impl Cli {
    /// Log filter implied by `--quiet` / `--verbose`.
    #[must_use]
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            inventory,
            instance,
            json,
            quiet,
            verbose: _,
            no_color,
            command,
        } = self;

        if let Command::Version = command {
            commands::version::run(json);
            return Ok(());
        }

        let flags = AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            instance,
        };
        let mut app = AppContext::new(&flags)?;
        if command.needs_inventory() {
            let reserved = reserved_names();
            let reserved: Vec<&str> = reserved.iter().map(String::as_str).collect();
            app.load_inventory(&YamlInventoryFile::new(inventory), &reserved)?;
        }

        let mut command = command;
        loop {
            match command {
                Command::External(args) => {
                    let Some((name, rest)) = args.split_first() else {
                        return Ok(());
                    };
                    if !app.run_selector(name)? {
                        anyhow::bail!(
                            "'{name}' is neither a command nor an instance. Run 'povfab tasks' to list instances."
                        );
                    }
                    if rest.is_empty() {
                        return Ok(());
                    }
                    command = Tail::try_parse_from(rest).unwrap_or_else(|e| e.exit()).command;
                }
                other => return dispatch(&mut app, other).await,
            }
        }
    }
}

async fn dispatch(app: &mut AppContext, command: Command) -> Result<()> {
    match command {
        Command::Tasks => commands::tasks::run(app),
        Command::Instances => commands::instances::run(app),
        Command::AptUpdate => commands::apt::update(app).await,
        Command::PackageInstalled(args) => commands::apt::installed(app, &args).await,
        Command::Install(args) => commands::apt::install(app, args).await,
        Command::KnownHost(args) => commands::system::known_host(app, &args).await,
        Command::EnsureUser(args) => commands::system::ensure_user(app, &args).await,
        Command::GitClone(args) => commands::git::run(app, &args).await,
        Command::PgUser(args) => commands::postgres::user(app, &args).await,
        Command::PgDb(args) => commands::postgres::db(app, &args).await,
        Command::Changelog(args) => commands::changelog::run(app, &args).await,
        Command::Config(cmd) => commands::config::run(app, cmd),
        Command::Version => {
            commands::version::run(app.is_json());
            Ok(())
        }
        Command::External(_) => Ok(()),
    }
}
