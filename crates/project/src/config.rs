use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR_NAME: &str = ".atlas";
pub const CONFIG_FILE_NAME: &str = "config.json";

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

/// An explicitly declared area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Globs (anything containing `/`, `*`, `?` or `[`) or file-name substrings.
    #[serde(rename = "match")]
    pub rules: Vec<String>,
}

/// Project settings read from `.atlas/config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub areas: BTreeMap<String, AreaDefinition>,
    /// Relative path -> one-line description override.
    pub descriptions: BTreeMap<String, String>,
    /// Globs matched case-insensitively, like area `match` rules.
    pub ignore: Vec<String>,
    pub auto_describe: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            areas: BTreeMap::new(),
            descriptions: BTreeMap::new(),
            ignore: Vec::new(),
            auto_describe: true,
        }
    }
}

impl ProjectConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read the config file; `Ok(None)` when the project has none.
    pub fn try_load(root: &Path) -> Result<Option<Self>> {
        let path = config_path(root);
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path)?;
        Ok(Some(Self::from_json_str(&raw)?))
    }

    /// Read the config file, degrading to defaults on any failure.
    pub fn load(root: &Path) -> Self {
        match Self::try_load(root) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(err) => {
                log::warn!(
                    "Failed to read {}: {err}; falling back to inferred areas",
                    config_path(root).display()
                );
                Self::default()
            }
        }
    }
}
