use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Catalog;

const APP_NAME: &str = "pocket-plant";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
    /// Recognized plant categories. "Other" is always accepted.
    pub categories: Vec<String>,
    /// Recognized sunlight requirements.
    pub sunlight_options: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let catalog = Catalog::default();
        Self {
            log_filter: "pocket_plant=info".to_string(),
            categories: catalog.categories,
            sunlight_options: catalog.sunlight_options,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, falling back to defaults.
    ///
    /// The load error, if any, is handed back rather than printed: logging is
    /// configured from this file, so the caller reports it once tracing is up.
    pub fn load_or_default(path: &Path) -> (Self, Option<anyhow::Error>) {
        match Self::try_load(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn try_load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;

        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save the current configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    pub fn catalog(&self) -> Catalog {
        Catalog {
            categories: self.categories.clone(),
            sunlight_options: self.sunlight_options.clone(),
        }
    }
}

/// `<config_dir>/pocket-plant/config.json`
pub fn default_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
