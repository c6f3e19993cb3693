//! Application context — unified state passed to every command handler.
//!
//! `AppContext` owns the operator configuration, the instance registry built
//! from the inventory, and the selector tasks generated while registering.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use povfab_common::{DEFAULT_PROGRAM, Instance, Registry, SelectorTask};
use serde::Serialize;

use crate::application::Outcome;
use crate::application::ports::InventorySource;
use crate::application::services::config_service;
use crate::domain::PovfabConfig;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::ssh::SshShell;
use crate::output::{OutputContext, json};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Instance named with `--instance`; wins over selector tasks.
    pub instance: Option<String>,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Operator configuration file.
    pub config_store: YamlConfigStore,
    /// Configuration loaded at start-up.
    pub config: PovfabConfig,
    /// Instances from the inventory.
    pub registry: Registry,
    /// One selector task per registered instance.
    pub tasks: Vec<SelectorTask>,
    explicit_instance: Option<String>,
}

/// JSON shape of an operation result.
#[derive(Serialize)]
struct OutcomeReport<'a> {
    host: &'a str,
    action: &'a str,
    outcome: Outcome,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// The registry starts empty; see [`AppContext::load_inventory`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        Self::with_config_store(flags, YamlConfigStore::new())
    }

    /// Like [`AppContext::new`], reading configuration from `config_store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read.
    pub fn with_config_store(flags: &AppFlags, config_store: YamlConfigStore) -> Result<Self> {
        let config = config_service::load_config(&config_store)?;
        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        Ok(Self {
            output: OutputContext::new(flags.output.no_color, flags.output.quiet),
            mode,
            config_store,
            config,
            registry: Registry::for_program(DEFAULT_PROGRAM),
            tasks: Vec::new(),
            explicit_instance: flags.instance.clone(),
        })
    }

    /// Register every inventory instance. `reserved` names cannot be used
    /// as instance names.
    ///
    /// # Errors
    ///
    /// Returns an error if the inventory cannot be read or an instance is
    /// invalid, duplicated or reserved.
    pub fn load_inventory(&mut self, source: &impl InventorySource, reserved: &[&str]) -> Result<()> {
        let (registry, tasks) = source.load()?.into_registry(DEFAULT_PROGRAM, reserved)?;
        tracing::debug!(instances = registry.len(), "inventory loaded");
        self.registry = registry;
        self.tasks = tasks;
        Ok(())
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Run the selector task called `name`, if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if the task cannot record its instance.
    pub fn run_selector(&mut self, name: &str) -> Result<bool> {
        let Some(task) = self.tasks.iter().find(|task| task.name() == name) else {
            return Ok(false);
        };
        task.run(&mut self.registry)?;
        tracing::debug!(instance = name, "instance selected");
        Ok(true)
    }

    /// The instance `command` should act on.
    ///
    /// # Errors
    ///
    /// Returns the registry's guidance when nothing (or an unknown name) is
    /// selected.
    pub fn instance(&self, command: &str) -> Result<&Instance> {
        Ok(self
            .registry
            .select(self.explicit_instance.as_deref(), command)?)
    }

    /// SSH transport to the instance `command` should act on.
    ///
    /// # Errors
    ///
    /// Same as [`AppContext::instance`].
    pub fn shell(&self, command: &str) -> Result<SshShell<TokioCommandRunner>> {
        let instance = self.instance(command)?;
        let timeout = Duration::from_secs(self.config.remote.command_timeout);
        Ok(SshShell::new(
            TokioCommandRunner::new(timeout),
            instance.host(),
            self.config.ssh.clone(),
            timeout,
        ))
    }

    /// Report what an operation did, as text or JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn report(&self, host: &str, action: &str, outcome: Outcome) -> Result<()> {
        if self.is_json() {
            let report = OutcomeReport {
                host,
                action,
                outcome,
            };
            self.output.raw(&json::to_pretty(&report)?);
        } else {
            self.output.outcome(host, outcome, action);
        }
        Ok(())
    }

    /// Path of the configuration file, for messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn config_path(&self) -> Result<PathBuf> {
        use crate::application::ports::ConfigStore as _;
        self.config_store
            .path()
            .context("cannot locate configuration file")
    }
}
