//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod command;
pub mod config;
pub mod error;
pub mod inventory;
pub mod message;
pub mod packages;
pub mod postgres;
pub mod remote_path;

pub use command::{Body, CommandOutput, Privilege, RemoteCommand};
pub use config::{PovfabConfig, RemoteConfig, SshConfig, validate_config_key, validate_config_value};
pub use error::{ConfigError, GitError, RemoteError};
pub use inventory::Inventory;
pub use packages::{InstallOptions, PackageList};
