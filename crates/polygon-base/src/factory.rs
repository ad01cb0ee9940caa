//! Factory seam between shape plugins and their host

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

use crate::{RegularPolygon, Result, BASE_CLASS_TYPE};

/// Class metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetadata {
    /// Registered class type
    pub class_type: String,

    /// Interface the class is exported under
    pub base_class_type: String,

    /// Name hosts use to request the class
    pub lookup_name: String,

    /// Human readable description
    pub description: String,
}

impl ClassMetadata {
    /// Metadata for a class reachable only by its class type
    pub fn new(class_type: &str, description: &str) -> Self {
        Self {
            class_type: class_type.to_string(),
            base_class_type: BASE_CLASS_TYPE.to_string(),
            lookup_name: class_type.to_string(),
            description: description.to_string(),
        }
    }
}

/// Shape type exported to a host, see [`export_class!`](crate::export_class)
pub trait ExportedClass: RegularPolygon + Default + 'static {
    /// Registered class type
    const CLASS_TYPE: &'static str;

    /// Human readable description
    const DESCRIPTION: &'static str;
}

/// Plugin factory trait for creating shape instances
#[async_trait]
pub trait PolygonFactory: Send + Sync {
    /// Metadata of the class this factory builds
    fn metadata(&self) -> ClassMetadata;

    /// Create a new, uninitialized instance
    async fn create_instance(&self) -> Result<Box<dyn RegularPolygon>>;

    /// Clone the factory as a boxed trait object
    fn clone_box(&self) -> Box<dyn PolygonFactory>;
}

/// Factory for any [`ExportedClass`]
pub struct ClassFactory<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: ExportedClass> ClassFactory<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: ExportedClass> Default for ClassFactory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ExportedClass> fmt::Debug for ClassFactory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassFactory")
            .field("class_type", &T::CLASS_TYPE)
            .finish()
    }
}

#[async_trait]
impl<T: ExportedClass> PolygonFactory for ClassFactory<T> {
    fn metadata(&self) -> ClassMetadata {
        ClassMetadata::new(T::CLASS_TYPE, T::DESCRIPTION)
    }

    async fn create_instance(&self) -> Result<Box<dyn RegularPolygon>> {
        Ok(Box::new(T::default()))
    }

    fn clone_box(&self) -> Box<dyn PolygonFactory> {
        Box::new(Self::new())
    }
}
