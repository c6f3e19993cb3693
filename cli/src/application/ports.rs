//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{CommandOutput, Inventory, PovfabConfig, RemoteCommand};

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts local process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Remote Shell Port ─────────────────────────────────────────────────────────

/// Executes structured commands on one remote host.
///
/// A non-zero exit is reported in the returned [`CommandOutput`], not as an
/// error; `Err` means the command could not be delivered at all.
#[allow(async_fn_in_trait)]
pub trait RemoteShell {
    /// Destination the commands run on, for messages.
    fn host(&self) -> &str;
    /// Execute `command` and capture its result.
    async fn execute(&self, command: &RemoteCommand) -> Result<CommandOutput>;
}

// ── Config and Inventory Ports ────────────────────────────────────────────────

/// Abstracts operator configuration persistence.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when absent.
    fn load(&self) -> Result<PovfabConfig>;
    /// Persist the configuration.
    fn save(&self, config: &PovfabConfig) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}

/// Abstracts where instance definitions come from.
pub trait InventorySource {
    /// Load and parse the inventory.
    fn load(&self) -> Result<Inventory>;
}
