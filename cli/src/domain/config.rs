//! Domain types and validators for povfab configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "ssh.forward_agent",
    "ssh.connect_timeout",
    "remote.command_timeout",
    "remote.locale",
];
pub const VALID_BOOLEANS: &[&str] = &["true", "false"];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.povfab/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PovfabConfig {
    /// How the local `ssh` client is invoked.
    pub ssh: SshConfig,
    /// Remote command behaviour.
    pub remote: RemoteConfig,
}

/// SSH client settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SshConfig {
    /// Forward the local agent (`ssh -A`); required for `git-clone` over SSH.
    pub forward_agent: bool,
    /// `ConnectTimeout` in seconds.
    pub connect_timeout: u64,
    /// Extra `-o` options passed verbatim, e.g. `StrictHostKeyChecking=accept-new`.
    pub options: Vec<String>,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            forward_agent: true,
            connect_timeout: 10,
            options: Vec::new(),
        }
    }
}

/// Remote command settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RemoteConfig {
    /// Per-command timeout in seconds.
    pub command_timeout: u64,
    /// `LC_ALL` forced for PostgreSQL tooling.
    pub locale: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            command_timeout: 600,
            locale: default_locale(),
        }
    }
}

fn default_locale() -> String {
    "C.UTF-8".to_string()
}

impl PovfabConfig {
    /// Apply an already-validated `key = value` pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the key or value does not validate.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        validate_config_key(key)?;
        validate_config_value(key, value)?;
        match key {
            "ssh.forward_agent" => self.ssh.forward_agent = value == "true",
            "ssh.connect_timeout" => self.ssh.connect_timeout = value.parse()?,
            "remote.command_timeout" => self.remote.command_timeout = value.parse()?,
            "remote.locale" => self.remote.locale = value.to_string(),
            _ => anyhow::bail!("Unknown setting: {key}"),
        }
        Ok(())
    }

    /// Check every settable value, as `set` would.
    ///
    /// # Errors
    ///
    /// Returns the first value that does not validate.
    pub fn validate(&self) -> Result<()> {
        validate_config_value("ssh.connect_timeout", &self.ssh.connect_timeout.to_string())?;
        validate_config_value(
            "remote.command_timeout",
            &self.remote.command_timeout.to_string(),
        )?;
        validate_config_value("remote.locale", &self.remote.locale)
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let valid = match key {
        "ssh.forward_agent" if !VALID_BOOLEANS.contains(&value) => VALID_BOOLEANS.join(", "),
        "ssh.connect_timeout" | "remote.command_timeout"
            if !value.parse::<u64>().is_ok_and(|secs| secs > 0) =>
        {
            "a positive number of seconds".to_string()
        }
        "remote.locale" if value.is_empty() || value.contains(char::is_whitespace) => {
            "a locale name without whitespace, e.g. C.UTF-8".to_string()
        }
        _ => return Ok(()),
    };
    Err(ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        valid,
    }
    .into())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
