use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::counter;
use crate::utils::error::{ForgeError, Result};

/// Run settings, loaded from a TOML file. Everything has a default so an
/// absent file means "default run".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Render skill orders as shorthand ("Q.W.E.Q - Q>W>E") instead of the
    /// full dot-joined ordering.
    pub shorthand_skills: bool,

    /// Emit separate most-frequent and highest-win builds instead of merging
    /// them into one document.
    pub split_builds: bool,

    /// When set, stamped into every document's mapIdentifier field.
    pub lock_map: Option<String>,

    /// Always-offered supplementary items appended to starter blocks.
    pub trinkets: Vec<u32>,

    /// Extra item-id aliases on top of the built-in table.
    pub remap: Vec<RemapEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemapEntry {
    pub from: u32,
    pub to: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shorthand_skills: false,
            split_builds: false,
            lock_map: None,
            trinkets: vec![3340, 3363, 3364],
            remap: Vec::new(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ForgeError::Config {
            message: format!("Failed to parse settings file {}: {}", path.display(), e),
        })
    }

    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// The built-in alias table extended with any configured pairs.
    pub fn remap_table(&self) -> HashMap<u32, u32> {
        let mut table = counter::default_remap();
        for entry in &self.remap {
            table.insert(entry.from, entry.to);
        }
        table
    }
}
