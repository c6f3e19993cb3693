//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Config errors ─────────────────────────────────────────────────────────────

/// Configuration and call-site validation errors. Always fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },

    #[error("Unexpected install option(s): {}\n\nValid options: missing_only, interactive", .0.join(", "))]
    UnknownOptions(Vec<String>),

    #[error("Invalid install option '{0}': expected key=value with a true/false value")]
    InvalidOption(String),

    #[error("Invalid message template: {0}")]
    Placeholder(String),

    #[error("Instance name '{0}' clashes with a built-in command. Rename the instance.")]
    ReservedInstanceName(String),
}

// ── Remote execution errors ───────────────────────────────────────────────────

/// A mutating remote command exited unsuccessfully.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("[{host}] command failed ({}): {command}\n{stderr}", exit_label(.code))]
    CommandFailed {
        host: String,
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

#[allow(clippy::ref_option)]
fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

// ── Git errors ────────────────────────────────────────────────────────────────

/// Preconditions of the git synchronization operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GitError {
    #[error("{0} already contains a git checkout. Re-run with --force to fetch and reset it.")]
    DestinationExists(String),

    #[error("git describe in {0} returned nothing")]
    EmptyDescriptor(String),
}
