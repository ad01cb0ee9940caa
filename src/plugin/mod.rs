//! Plugin host for shape classes exported under `RegularPolygon`

use polygon_base::{ClassMetadata, PolygonError, PolygonFactory, RegularPolygon, BASE_CLASS_TYPE};
use std::collections::{HashMap, HashSet};
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub mod registry;

pub use registry::*;

/// Class loader error
#[derive(Debug, Error)]
pub enum LoaderError {
    /// No factory or lookup name matches
    #[error("no class registered under name: {0}")]
    UnknownClass(String),

    /// Class exists but has been disabled
    #[error("class is disabled: {0}")]
    ClassDisabled(String),

    /// Class is exported under a different interface
    #[error("{class_type} is exported as {base_class_type}, expected {expected}")]
    BaseClassMismatch {
        class_type: String,
        base_class_type: String,
        expected: String,
    },

    /// Error raised by the shape itself
    #[error(transparent)]
    Polygon(#[from] PolygonError),
}

/// Registered factory and its live-instance counter
struct FactoryEntry {
    factory: Box<dyn PolygonFactory>,
    live_instances: Arc<AtomicUsize>,
}

/// Shape instance handed out by the [`PluginManager`]
///
/// Dereferences to the shape; dropping it releases the instance.
pub struct PolygonInstance {
    inner: Box<dyn RegularPolygon>,
    live_instances: Arc<AtomicUsize>,
}

impl PolygonInstance {
    fn new(inner: Box<dyn RegularPolygon>, live_instances: Arc<AtomicUsize>) -> Self {
        live_instances.fetch_add(1, Ordering::SeqCst);
        Self {
            inner,
            live_instances,
        }
    }
}

impl Deref for PolygonInstance {
    type Target = dyn RegularPolygon;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl DerefMut for PolygonInstance {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.inner.as_mut()
    }
}

impl Drop for PolygonInstance {
    fn drop(&mut self) {
        self.live_instances.fetch_sub(1, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for PolygonInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolygonInstance")
            .field("class_type", &self.inner.class_type())
            .field("side_length", &self.inner.side_length())
            .finish()
    }
}

/// Class loader for shape plugins
///
/// Factories are keyed by class type. Lookup names bound from plugin
/// manifests resolve to a class type and carry its description.
pub struct PluginManager {
    /// Plugin factories by class type
    factories: Arc<RwLock<HashMap<String, FactoryEntry>>>,

    /// Bound lookup names
    lookup_names: Arc<RwLock<HashMap<String, ClassMetadata>>>,

    /// Disabled lookup names and class types
    disabled: Arc<RwLock<HashSet<String>>>,
}

impl PluginManager {
    /// Create a new plugin manager
    pub fn new() -> Self {
        Self {
            factories: Arc::new(RwLock::new(HashMap::new())),
            lookup_names: Arc::new(RwLock::new(HashMap::new())),
            disabled: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Interface every class in this loader is exported under
    pub fn base_class_type(&self) -> &'static str {
        BASE_CLASS_TYPE
    }

    /// Register a plugin factory under its class type
    pub async fn register_factory(
        &self,
        factory: Box<dyn PolygonFactory>,
    ) -> Result<(), LoaderError> {
        let metadata = factory.metadata();
        self.check_base_class(&metadata)?;

        let mut factories = self.factories.write().await;

        // Live instances outlive a replaced factory
        if let Some(entry) = factories.get_mut(&metadata.class_type) {
            entry.factory = factory;
            warn!("Replaced factory for class: {}", metadata.class_type);
            return Ok(());
        }

        factories.insert(
            metadata.class_type.clone(),
            FactoryEntry {
                factory,
                live_instances: Arc::new(AtomicUsize::new(0)),
            },
        );
        info!("Registered class: {}", metadata.class_type);
        Ok(())
    }

    /// Bind a lookup name to a registered class type
    pub async fn bind_lookup_name(&self, metadata: ClassMetadata) -> Result<(), LoaderError> {
        self.check_base_class(&metadata)?;

        if !self
            .factories
            .read()
            .await
            .contains_key(&metadata.class_type)
        {
            return Err(LoaderError::UnknownClass(metadata.class_type));
        }

        debug!(
            "Binding lookup name {} to {}",
            metadata.lookup_name, metadata.class_type
        );
        self.lookup_names
            .write()
            .await
            .insert(metadata.lookup_name.clone(), metadata);
        Ok(())
    }

    /// Enable or disable a lookup name or class type
    pub async fn set_enabled(&self, name: &str, enabled: bool) {
        let mut disabled = self.disabled.write().await;
        if enabled {
            disabled.remove(name);
        } else {
            disabled.insert(name.to_string());
        }
    }

    /// Names by which classes can be requested, sorted
    ///
    /// Class types that have a bound lookup name are listed only under it.
    pub async fn declared_classes(&self) -> Vec<String> {
        let factories = self.factories.read().await;
        let lookup_names = self.lookup_names.read().await;

        let bound: HashSet<&str> = lookup_names
            .values()
            .map(|metadata| metadata.class_type.as_str())
            .collect();

        let mut names: Vec<String> = lookup_names
            .keys()
            .cloned()
            .chain(
                factories
                    .keys()
                    .filter(|class_type| !bound.contains(class_type.as_str()))
                    .cloned(),
            )
            .collect();
        names.sort();
        names
    }

    /// Check whether a name resolves to a registered class
    pub async fn is_class_available(&self, name: &str) -> bool {
        self.resolve(name).await.is_ok()
    }

    /// Metadata for a lookup name or class type
    pub async fn class_metadata(&self, name: &str) -> Option<ClassMetadata> {
        self.resolve(name).await.ok()
    }

    /// Create a new, uninitialized instance of a class
    pub async fn create_instance(&self, name: &str) -> Result<PolygonInstance, LoaderError> {
        let metadata = self.resolve(name).await?;

        {
            let disabled = self.disabled.read().await;
            if disabled.contains(name)
                || disabled.contains(&metadata.lookup_name)
                || disabled.contains(&metadata.class_type)
            {
                return Err(LoaderError::ClassDisabled(name.to_string()));
            }
        }

        let (factory, live_instances) = {
            let factories = self.factories.read().await;
            let entry = factories
                .get(&metadata.class_type)
                .ok_or_else(|| LoaderError::UnknownClass(name.to_string()))?;
            (entry.factory.clone_box(), Arc::clone(&entry.live_instances))
        };

        let polygon = factory.create_instance().await?;
        debug!("Created instance of {}", metadata.class_type);
        Ok(PolygonInstance::new(polygon, live_instances))
    }

    /// Create an instance and initialize it with a side length
    pub async fn create_initialized(
        &self,
        name: &str,
        side_length: f64,
    ) -> Result<PolygonInstance, LoaderError> {
        let mut instance = self.create_instance(name).await?;
        instance.initialize(side_length)?;
        Ok(instance)
    }

    /// Number of live instances of a class
    pub async fn instance_count(&self, name: &str) -> usize {
        let Ok(metadata) = self.resolve(name).await else {
            return 0;
        };

        self.factories
            .read()
            .await
            .get(&metadata.class_type)
            .map(|entry| entry.live_instances.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Whether any instance of a class is alive
    pub async fn is_class_loaded(&self, name: &str) -> bool {
        self.instance_count(name).await > 0
    }

    /// Resolve a lookup name, falling back to a class type
    async fn resolve(&self, name: &str) -> Result<ClassMetadata, LoaderError> {
        if let Some(metadata) = self.lookup_names.read().await.get(name) {
            return Ok(metadata.clone());
        }

        self.factories
            .read()
            .await
            .get(name)
            .map(|entry| entry.factory.metadata())
            .ok_or_else(|| LoaderError::UnknownClass(name.to_string()))
    }

    fn check_base_class(&self, metadata: &ClassMetadata) -> Result<(), LoaderError> {
        if metadata.base_class_type != BASE_CLASS_TYPE {
            return Err(LoaderError::BaseClassMismatch {
                class_type: metadata.class_type.clone(),
                base_class_type: metadata.base_class_type.clone(),
                expected: BASE_CLASS_TYPE.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygons::{exported_classes, Square};
    use polygon_base::ClassFactory;

    async fn manager_with_builtins() -> PluginManager {
        let manager = PluginManager::new();
        for factory in exported_classes() {
            manager.register_factory(factory).await.unwrap();
        }
        manager
    }

    #[tokio::test]
    async fn test_plugin_manager_creation() {
        let manager = PluginManager::new();
        assert!(manager.factories.read().await.is_empty());
        assert!(manager.declared_classes().await.is_empty());
        assert_eq!(manager.base_class_type(), "polygon_base::RegularPolygon");
    }

    #[tokio::test]
    async fn test_create_by_class_type() {
        let manager = manager_with_builtins().await;

        let square = manager
            .create_initialized("polygon_plugins::Square", 2.0)
            .await
            .unwrap();
        assert_eq!(square.area().unwrap(), 4.0);

        let triangle = manager
            .create_initialized("polygon_plugins::Triangle", 2.0)
            .await
            .unwrap();
        assert!((triangle.area().unwrap() - 1.7320508075688772).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unknown_class() {
        let manager = manager_with_builtins().await;

        let err = manager.create_instance("polygon_plugins::Hexagon").await;
        assert!(matches!(err, Err(LoaderError::UnknownClass(_))));
        assert!(!manager.is_class_available("polygon_plugins::Hexagon").await);
    }

    #[tokio::test]
    async fn test_lookup_names() {
        let manager = manager_with_builtins().await;

        let mut metadata = ClassMetadata::new("polygon_plugins::Square", "Four equal sides");
        metadata.lookup_name = "polygon_plugins/Square".to_string();
        manager.bind_lookup_name(metadata).await.unwrap();

        assert_eq!(
            manager.declared_classes().await,
            vec!["polygon_plugins/Square", "polygon_plugins::Triangle"]
        );

        let described = manager
            .class_metadata("polygon_plugins/Square")
            .await
            .unwrap();
        assert_eq!(described.description, "Four equal sides");

        let square = manager.create_instance("polygon_plugins/Square").await.unwrap();
        assert_eq!(square.class_type(), "polygon_plugins::Square");
    }

    #[tokio::test]
    async fn test_bind_unknown_class_type() {
        let manager = manager_with_builtins().await;

        let mut metadata = ClassMetadata::new("polygon_plugins::Pentagon", "");
        metadata.lookup_name = "polygon_plugins/Pentagon".to_string();
        assert!(matches!(
            manager.bind_lookup_name(metadata).await,
            Err(LoaderError::UnknownClass(_))
        ));
    }

    #[tokio::test]
    async fn test_base_class_mismatch() {
        let manager = manager_with_builtins().await;

        let mut metadata = ClassMetadata::new("polygon_plugins::Square", "");
        metadata.base_class_type = "shapes::Circle".to_string();
        assert!(matches!(
            manager.bind_lookup_name(metadata).await,
            Err(LoaderError::BaseClassMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_disabled_class() {
        let manager = manager_with_builtins().await;

        manager.set_enabled("polygon_plugins::Square", false).await;
        assert!(matches!(
            manager.create_instance("polygon_plugins::Square").await,
            Err(LoaderError::ClassDisabled(_))
        ));

        manager.set_enabled("polygon_plugins::Square", true).await;
        assert!(manager.create_instance("polygon_plugins::Square").await.is_ok());
    }

    #[tokio::test]
    async fn test_instance_count() {
        let manager = manager_with_builtins().await;
        let name = "polygon_plugins::Triangle";

        assert!(!manager.is_class_loaded(name).await);

        let first = manager.create_instance(name).await.unwrap();
        let second = manager.create_instance(name).await.unwrap();
        assert_eq!(manager.instance_count(name).await, 2);

        drop(first);
        assert_eq!(manager.instance_count(name).await, 1);

        drop(second);
        assert!(!manager.is_class_loaded(name).await);
    }

    #[tokio::test]
    async fn test_invalid_side_length_surfaces_polygon_error() {
        let manager = manager_with_builtins().await;

        let err = manager
            .create_initialized("polygon_plugins::Square", -2.0)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LoaderError::Polygon(PolygonError::InvalidArgument { .. })
        ));
        assert_eq!(manager.instance_count("polygon_plugins::Square").await, 0);
    }

    #[tokio::test]
    async fn test_reregistering_keeps_instance_count() {
        let manager = manager_with_builtins().await;
        let square = manager
            .create_instance("polygon_plugins::Square")
            .await
            .unwrap();

        manager
            .register_factory(Box::new(ClassFactory::<Square>::new()))
            .await
            .unwrap();
        assert_eq!(manager.instance_count("polygon_plugins::Square").await, 1);

        drop(square);
        assert_eq!(manager.instance_count("polygon_plugins::Square").await, 0);
    }

    #[tokio::test]
    async fn test_disable_applies_to_name_used() {
        let manager = manager_with_builtins().await;

        let mut metadata = ClassMetadata::new("polygon_plugins::Square", "");
        metadata.lookup_name = "polygon_plugins/Square".to_string();
        manager.bind_lookup_name(metadata).await.unwrap();

        // Disabling a lookup name leaves the class type usable
        manager.set_enabled("polygon_plugins/Square", false).await;
        assert!(matches!(
            manager.create_instance("polygon_plugins/Square").await,
            Err(LoaderError::ClassDisabled(_))
        ));
        assert!(manager
            .create_instance("polygon_plugins::Square")
            .await
            .is_ok());
        manager.set_enabled("polygon_plugins/Square", true).await;

        // Disabling the class type blocks every lookup name bound to it
        manager.set_enabled("polygon_plugins::Square", false).await;
        assert!(matches!(
            manager.create_instance("polygon_plugins/Square").await,
            Err(LoaderError::ClassDisabled(_))
        ));
        assert!(matches!(
            manager.create_instance("polygon_plugins::Square").await,
            Err(LoaderError::ClassDisabled(_))
        ));
    }

    #[tokio::test]
    async fn test_reregistering_replaces_factory() {
        let manager = manager_with_builtins().await;
        manager
            .register_factory(Box::new(ClassFactory::<Square>::new()))
            .await
            .unwrap();

        assert_eq!(manager.declared_classes().await.len(), 2);
    }
}
