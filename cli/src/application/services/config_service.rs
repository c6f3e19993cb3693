//! Application service — configuration use-cases.

use crate::application::ports::ConfigStore;
use crate::domain::config::PovfabConfig;
use anyhow::Result;

/// Load configuration.
pub fn load_config(store: &impl ConfigStore) -> Result<PovfabConfig> {
    store.load()
}

/// Save configuration.
pub fn save_config(store: &impl ConfigStore, config: &PovfabConfig) -> Result<()> {
    store.save(config)
}

/// Apply `key = value` to the stored configuration and persist it.
///
/// # Errors
///
/// Fails when the key or value is rejected, or the store cannot be written.
pub fn set_config_value(store: &impl ConfigStore, key: &str, value: &str) -> Result<PovfabConfig> {
    let mut config = store.load()?;
    config.set(key, value)?;
    store.save(&config)?;
    Ok(config)
}
