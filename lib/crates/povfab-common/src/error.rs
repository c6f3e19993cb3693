//! Error types for instance construction and registry lookups.

use thiserror::Error;

/// Errors raised while constructing an [`Instance`](crate::Instance).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError {
    #[error("Invalid instance name '{0}': must match ^[A-Za-z0-9][A-Za-z0-9_.-]*$")]
    InvalidName(String),

    #[error("Missing required instance parameter(s): {}", .0.join(", "))]
    MissingParam(Vec<String>),

    #[error("Unexpected instance parameter(s): {}", .0.join(", "))]
    UnexpectedParam(Vec<String>),
}

/// Errors raised by [`Registry`](crate::Registry) registration and selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Instance '{0}' is already defined")]
    Duplicate(String),

    #[error("No instances defined. Declare at least one instance in the inventory.")]
    NoInstances,

    #[error("Please specify an instance. Known instances: {}\n\nExample:\n{example}", .known.join(", "))]
    NotSelected { known: Vec<String>, example: String },

    #[error("Unknown instance '{name}'. Known instances: {}\n\nExample:\n{example}", .known.join(", "))]
    Unknown {
        name: String,
        known: Vec<String>,
        example: String,
    },
}
