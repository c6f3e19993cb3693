//! `povfab config` — show and set configuration values.

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::services::config_service;
use crate::output::json;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

/// Run the config command.
pub fn run(app: &mut AppContext, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show_config(app),
        ConfigCommand::Set { key, value } => set_config(app, &key, &value),
    }
}

fn show_config(app: &AppContext) -> Result<()> {
    let config = &app.config;
    if app.is_json() {
        app.output.raw(&json::to_pretty(config)?);
        return Ok(());
    }
    let path = app.config_path()?;
    app.output.header(&format!("Configuration ({})", path.display()));
    app.output
        .kv("ssh.forward_agent      ", &config.ssh.forward_agent.to_string());
    app.output
        .kv("ssh.connect_timeout    ", &config.ssh.connect_timeout.to_string());
    app.output.kv("ssh.options            ", &config.ssh.options.join(", "));
    app.output
        .kv("remote.command_timeout ", &config.remote.command_timeout.to_string());
    app.output.kv("remote.locale          ", &config.remote.locale);
    Ok(())
}

fn set_config(app: &mut AppContext, key: &str, value: &str) -> Result<()> {
    app.config = config_service::set_config_value(&app.config_store, key, value)?;
    app.output.success(&format!("Set {key} = {value}"));
    Ok(())
}
