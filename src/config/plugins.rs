//! Plugin discovery configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Plugin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Plugin directories to scan for plugin manifests
    #[serde(default)]
    pub plugin_directories: Vec<PathBuf>,

    /// Whether to enable manifest discovery
    #[serde(default = "default_true")]
    pub enable_external_discovery: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            plugin_directories: vec![
                PathBuf::from("./plugins"),
                PathBuf::from("~/.config/polygon-plugins/plugins"),
            ],
            enable_external_discovery: true,
        }
    }
}

fn default_true() -> bool {
    true
}
