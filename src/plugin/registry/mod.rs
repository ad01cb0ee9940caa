//! Plugin registry for managing plugin manifest discovery and registration

use anyhow::{anyhow, Result};
use tracing::{info, warn};

use polygon_base::{ClassMetadata, BASE_CLASS_TYPE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use walkdir::WalkDir;

use crate::plugin::PluginManager;
use crate::polygons;

/// Plugin registry entry, one per declared class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Class metadata
    pub metadata: ClassMetadata,

    /// Library that declares the class
    pub library: String,

    /// Manifest file path, `None` for built-in classes
    pub manifest_path: Option<PathBuf>,

    /// Plugin status
    pub status: RegistryPluginStatus,

    /// Last loaded timestamp
    pub last_loaded: Option<chrono::DateTime<chrono::Utc>>,
}

/// Plugin status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegistryPluginStatus {
    /// Plugin is available
    Available,

    /// Plugin is loaded
    Loaded,

    /// Plugin has errors
    Error(String),

    /// Plugin is disabled
    Disabled,
}

impl std::fmt::Display for RegistryPluginStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryPluginStatus::Available => write!(f, "available"),
            RegistryPluginStatus::Loaded => write!(f, "loaded"),
            RegistryPluginStatus::Error(e) => write!(f, "error: {}", e),
            RegistryPluginStatus::Disabled => write!(f, "disabled"),
        }
    }
}

/// Plugin registry for managing plugins
pub struct PluginRegistry {
    /// Registered classes by lookup name
    plugins: Arc<RwLock<HashMap<String, RegistryEntry>>>,

    /// Plugin directories
    plugin_dirs: Arc<RwLock<Vec<PathBuf>>>,

    /// Plugin manager
    plugin_manager: Arc<PluginManager>,
}

impl PluginRegistry {
    /// Create a new plugin registry
    pub fn new(plugin_manager: Arc<PluginManager>) -> Self {
        Self {
            plugins: Arc::new(RwLock::new(HashMap::new())),
            plugin_dirs: Arc::new(RwLock::new(Vec::new())),
            plugin_manager,
        }
    }

    /// Plugin manager backing this registry
    pub fn plugin_manager(&self) -> &Arc<PluginManager> {
        &self.plugin_manager
    }

    /// Add a plugin directory
    pub async fn add_plugin_directory(&self, dir: PathBuf) {
        self.plugin_dirs.write().await.push(dir);
    }

    /// Record the built-in manifest's classes that no discovered manifest declares
    pub async fn add_builtin_entries(&self) -> Result<()> {
        let manifest: PluginManifest = serde_yaml::from_str(BuiltinPluginLoader::MANIFEST)?;

        let mut plugins = self.plugins.write().await;
        for class in &manifest.classes {
            if plugins.contains_key(&class.name) {
                continue;
            }

            plugins.insert(
                class.name.clone(),
                RegistryEntry {
                    metadata: class.to_metadata(),
                    library: manifest.library.clone(),
                    manifest_path: None,
                    status: RegistryPluginStatus::Available,
                    last_loaded: None,
                },
            );
        }

        Ok(())
    }

    /// Discover plugins in registered directories
    pub async fn discover_plugins(&self) -> Result<()> {
        let plugin_dirs = self.plugin_dirs.read().await.clone();
        for plugin_dir in &plugin_dirs {
            self.scan_plugin_directory(plugin_dir).await?;
        }
        Ok(())
    }

    /// Scan a plugin directory for plugin manifests
    async fn scan_plugin_directory(&self, plugin_dir: &Path) -> Result<()> {
        if !plugin_dir.exists() {
            return Ok(());
        }

        info!("Scanning plugin directory: {:?}", plugin_dir);

        for entry in WalkDir::new(plugin_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();

            if let Some(file_name) = path.file_name() {
                if file_name == "plugin.yaml" || file_name == "plugin.yml" {
                    info!("Found plugin manifest: {:?}", path);
                    match self.load_plugin_manifest(path).await {
                        Ok(count) => {
                            info!("Loaded plugin manifest {:?} ({} classes)", path, count);
                        }
                        Err(e) => {
                            warn!("Failed to load plugin manifest {:?}: {}", path, e);
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Load a plugin manifest, returning the number of declared classes
    pub async fn load_plugin_manifest(&self, manifest_path: &Path) -> Result<usize> {
        let content = tokio::fs::read_to_string(manifest_path).await?;
        let manifest: PluginManifest = serde_yaml::from_str(&content)?;

        let mut plugins = self.plugins.write().await;
        for class in &manifest.classes {
            let metadata = class.to_metadata();
            let status = if metadata.base_class_type == BASE_CLASS_TYPE {
                RegistryPluginStatus::Available
            } else {
                RegistryPluginStatus::Error(format!(
                    "exported as {}, expected {}",
                    metadata.base_class_type, BASE_CLASS_TYPE
                ))
            };

            let lookup_name = metadata.lookup_name.clone();
            let entry = RegistryEntry {
                metadata,
                library: manifest.library.clone(),
                manifest_path: Some(manifest_path.to_path_buf()),
                status,
                last_loaded: None,
            };

            if plugins.insert(lookup_name.clone(), entry).is_some() {
                warn!(
                    "Class {} declared more than once, keeping {:?}",
                    lookup_name, manifest_path
                );
            }
        }

        Ok(manifest.classes.len())
    }

    /// Bind a declared class to its compiled factory
    pub async fn load_plugin(&self, lookup_name: &str) -> Result<()> {
        let mut plugins = self.plugins.write().await;

        let entry = plugins
            .get_mut(lookup_name)
            .ok_or_else(|| anyhow!("Unknown plugin: {}", lookup_name))?;

        if entry.status == RegistryPluginStatus::Disabled {
            return Err(anyhow!("Plugin is disabled: {}", lookup_name));
        }

        match self
            .plugin_manager
            .bind_lookup_name(entry.metadata.clone())
            .await
        {
            Ok(_) => {
                entry.status = RegistryPluginStatus::Loaded;
                entry.last_loaded = Some(chrono::Utc::now());
                Ok(())
            }
            Err(e) => {
                entry.status = RegistryPluginStatus::Error(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Get all registered plugins, sorted by lookup name
    pub async fn get_plugins(&self) -> Vec<RegistryEntry> {
        let plugins = self.plugins.read().await;
        let mut entries: Vec<_> = plugins.values().cloned().collect();
        entries.sort_by(|a, b| a.metadata.lookup_name.cmp(&b.metadata.lookup_name));
        entries
    }

    /// Get plugin by lookup name
    pub async fn get_plugin(&self, lookup_name: &str) -> Option<RegistryEntry> {
        let plugins = self.plugins.read().await;
        plugins.get(lookup_name).cloned()
    }

    /// Enable a plugin
    pub async fn enable_plugin(&self, lookup_name: &str) -> Result<()> {
        let mut plugins = self.plugins.write().await;

        let entry = plugins
            .get_mut(lookup_name)
            .ok_or_else(|| anyhow!("Unknown plugin: {}", lookup_name))?;

        entry.status = if entry.last_loaded.is_some() {
            RegistryPluginStatus::Loaded
        } else {
            RegistryPluginStatus::Available
        };
        self.plugin_manager.set_enabled(lookup_name, true).await;

        Ok(())
    }

    /// Disable a plugin
    pub async fn disable_plugin(&self, lookup_name: &str) -> Result<()> {
        let mut plugins = self.plugins.write().await;

        let entry = plugins
            .get_mut(lookup_name)
            .ok_or_else(|| anyhow!("Unknown plugin: {}", lookup_name))?;

        entry.status = RegistryPluginStatus::Disabled;
        self.plugin_manager.set_enabled(lookup_name, false).await;

        Ok(())
    }

    /// Get plugins declared by a library
    pub async fn get_plugins_by_library(&self, library: &str) -> Vec<RegistryEntry> {
        self.get_plugins()
            .await
            .into_iter()
            .filter(|entry| entry.library == library)
            .collect()
    }
}

/// Plugin manifest file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Library that provides the classes
    pub library: String,

    /// Declared classes
    pub classes: Vec<ManifestClass>,
}

/// Class declared in a plugin manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestClass {
    /// Lookup name
    pub name: String,

    /// Registered class type
    #[serde(rename = "type")]
    pub class_type: String,

    /// Interface the class is exported under
    #[serde(default = "default_base_class_type")]
    pub base_class_type: String,

    /// Class description
    #[serde(default)]
    pub description: String,
}

impl ManifestClass {
    /// Convert to class metadata
    pub fn to_metadata(&self) -> ClassMetadata {
        ClassMetadata {
            class_type: self.class_type.clone(),
            base_class_type: self.base_class_type.clone(),
            lookup_name: self.name.clone(),
            description: self.description.trim().to_string(),
        }
    }
}

fn default_base_class_type() -> String {
    BASE_CLASS_TYPE.to_string()
}

/// Built-in plugin loader
pub struct BuiltinPluginLoader;

impl BuiltinPluginLoader {
    /// Manifest declaring the classes compiled into this crate
    pub const MANIFEST: &'static str =
        include_str!("../../../plugins/polygon_plugins/plugin.yaml");

    /// Register every compiled-in shape factory
    pub async fn load_builtin_plugins(plugin_manager: &Arc<PluginManager>) -> Result<()> {
        for factory in polygons::exported_classes() {
            plugin_manager.register_factory(factory).await?;
        }

        Ok(())
    }

    /// Class types of the compiled-in shapes
    pub fn builtin_class_types() -> Vec<String> {
        polygons::exported_classes()
            .iter()
            .map(|factory| factory.metadata().class_type)
            .collect()
    }
}

/// Outcome of a discovery run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscoverySummary {
    /// Classes bound to a factory
    pub loaded: usize,

    /// Classes that failed to bind
    pub errors: usize,
}

/// Plugin discovery service
pub struct PluginDiscoveryService {
    /// Registry instance
    registry: Arc<PluginRegistry>,
}

impl PluginDiscoveryService {
    /// Create a new plugin discovery service
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self { registry }
    }

    /// Discover and load all available plugins
    pub async fn discover_and_load(&self) -> Result<DiscoverySummary> {
        info!("Starting plugin discovery and loading process");

        info!("Loading built-in plugins");
        BuiltinPluginLoader::load_builtin_plugins(self.registry.plugin_manager()).await?;

        info!("Discovering plugins from configured directories");
        self.registry.discover_plugins().await?;
        self.registry.add_builtin_entries().await?;

        let mut summary = DiscoverySummary::default();
        for plugin in self.registry.get_plugins().await {
            match &plugin.status {
                RegistryPluginStatus::Available => {}
                RegistryPluginStatus::Error(e) => {
                    warn!(
                        "Skipping plugin {}: {}",
                        plugin.metadata.lookup_name, e
                    );
                    summary.errors += 1;
                    continue;
                }
                _ => continue,
            }

            match self.registry.load_plugin(&plugin.metadata.lookup_name).await {
                Ok(_) => {
                    info!("Successfully loaded plugin: {}", plugin.metadata.lookup_name);
                    summary.loaded += 1;
                }
                Err(e) => {
                    warn!(
                        "Failed to load plugin {}: {}",
                        plugin.metadata.lookup_name, e
                    );
                    summary.errors += 1;
                }
            }
        }

        info!(
            "Plugin discovery completed: {} loaded, {} errors",
            summary.loaded, summary.errors
        );
        Ok(summary)
    }
}
