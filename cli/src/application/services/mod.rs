//! Application services — use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports` — never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod apt;
pub mod changelog;
pub mod config_service;
pub mod git;
pub mod postgres;
pub mod remote;
pub mod system;

/// What an idempotent operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The remote state was changed.
    Changed,
    /// The desired state already held; nothing was run.
    Unchanged,
    /// An optional dependency was missing; nothing was run.
    Skipped,
}
