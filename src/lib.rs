//! Polygon Plugins Library
//!
//! Regular polygon shapes exported as plugins under the
//! `polygon_base::RegularPolygon` interface, and a host that discovers plugin
//! manifests and instantiates the shapes by name.

pub mod cli;
pub mod config;
pub mod plugin;
pub mod polygons;
pub mod utils;

pub use config::{Config, DemoConfig, PluginConfig};
pub use plugin::{
    BuiltinPluginLoader, DiscoverySummary, LoaderError, PluginDiscoveryService, PluginManager,
    PluginRegistry, PolygonInstance, RegistryEntry, RegistryPluginStatus,
};
pub use polygon_base::{ClassMetadata, PolygonError, RegularPolygon};
pub use polygons::{Square, Triangle};

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Area computed for one class by [`PolygonPlugins::run_demo`]
#[derive(Debug, Clone, PartialEq)]
pub struct DemoResult {
    /// Requested class name
    pub class_name: String,

    /// Side length the shape was initialized with
    pub side_length: f64,

    /// Computed area
    pub area: f64,
}

/// Main application context that coordinates all components
pub struct PolygonPlugins {
    config: Config,
    plugin_manager: Arc<PluginManager>,
    registry: Arc<PluginRegistry>,
}

impl PolygonPlugins {
    /// Create a new instance with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let plugin_manager = Arc::new(PluginManager::new());
        let registry = Arc::new(PluginRegistry::new(Arc::clone(&plugin_manager)));

        Ok(Self {
            config,
            plugin_manager,
            registry,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Class loader
    pub fn plugin_manager(&self) -> &Arc<PluginManager> {
        &self.plugin_manager
    }

    /// Plugin registry
    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    /// Initialize the plugin system
    pub async fn initialize_plugins(&self) -> Result<DiscoverySummary> {
        info!("Initializing plugin system");

        if self.config.plugins.enable_external_discovery {
            for plugin_dir in self.config.expanded_plugin_directories()? {
                if plugin_dir.exists() {
                    info!("Adding plugin directory: {:?}", plugin_dir);
                    self.registry.add_plugin_directory(plugin_dir).await;
                } else {
                    info!("Plugin directory does not exist, skipping: {:?}", plugin_dir);
                }
            }
        } else {
            info!("External plugin discovery is disabled");
        }

        let summary = PluginDiscoveryService::new(Arc::clone(&self.registry))
            .discover_and_load()
            .await?;

        if summary.errors > 0 {
            warn!("{} declared classes could not be loaded", summary.errors);
        }

        info!("Plugin system initialized successfully");
        Ok(summary)
    }

    /// Get information about every registered class
    pub async fn get_plugin_info(&self) -> Result<Vec<RegistryEntry>> {
        Ok(self.registry.get_plugins().await)
    }

    /// Create an instance of a class and initialize it
    pub async fn create_polygon(
        &self,
        class_name: &str,
        side_length: f64,
    ) -> Result<PolygonInstance> {
        let polygon = self
            .plugin_manager
            .create_initialized(class_name, side_length)
            .await?;
        Ok(polygon)
    }

    /// Instantiate every configured demo class and compute its area
    pub async fn run_demo(&self) -> Result<Vec<DemoResult>> {
        let side_length = self.config.demo.side_length;
        let mut results = Vec::new();

        for class_name in &self.config.demo.classes {
            let polygon = self.create_polygon(class_name, side_length).await?;
            let area = polygon.area()?;
            info!("{} with side length {} has area {}", class_name, side_length, area);

            results.push(DemoResult {
                class_name: class_name.clone(),
                side_length,
                area,
            });
        }

        Ok(results)
    }
}
