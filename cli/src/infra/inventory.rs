//! Infrastructure implementation of the `InventorySource` port.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::InventorySource;
use crate::domain::Inventory;

/// Inventory looked up in the working directory when none is given.
pub const DEFAULT_INVENTORY: &str = "povfab.yaml";

/// Inventory read from a YAML file.
#[derive(Debug)]
pub struct YamlInventoryFile {
    path: PathBuf,
    explicit: bool,
}

impl YamlInventoryFile {
    /// Inventory at `path`, or `./povfab.yaml` when `None`.
    ///
    /// A missing default file yields an empty inventory; a missing explicit
    /// file is an error.
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Self {
                path,
                explicit: true,
            },
            None => Self {
                path: PathBuf::from(DEFAULT_INVENTORY),
                explicit: false,
            },
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InventorySource for YamlInventoryFile {
    fn load(&self) -> Result<Inventory> {
        if !self.explicit && !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no inventory file");
            return Ok(Inventory::default());
        }
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("cannot read inventory {}", self.path.display()))?;
        Inventory::from_yaml(&text).with_context(|| format!("in {}", self.path.display()))
    }
}
