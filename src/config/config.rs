//! Main configuration structure and implementation

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{DemoConfig, PluginConfig};
use crate::utils;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Plugin configuration
    #[serde(default)]
    pub plugins: PluginConfig,

    /// Demo settings
    #[serde(default)]
    pub demo: DemoConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.version != "1.0" {
            return Err(anyhow!(
                "Unsupported configuration version: {}",
                self.version
            ));
        }

        self.demo.validate()?;

        Ok(())
    }

    /// Plugin directories with `~` and environment variables expanded
    pub fn expanded_plugin_directories(&self) -> Result<Vec<PathBuf>> {
        self.plugins
            .plugin_directories
            .iter()
            .map(|dir| utils::expand_path(dir))
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            plugins: PluginConfig::default(),
            demo: DemoConfig::default(),
        }
    }
}
