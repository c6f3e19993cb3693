//! Command implementations

pub mod apt;
pub mod changelog;
pub mod config;
pub mod git;
pub mod instances;
pub mod postgres;
pub mod system;
pub mod tasks;
pub mod version;
