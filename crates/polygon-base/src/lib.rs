//! Regular polygon plugin interface
//!
//! Shape plugins implement [`RegularPolygon`] and are exported to a host with
//! [`export_class!`]. Hosts build instances through the [`PolygonFactory`]
//! seam without knowing the concrete type.

pub mod error;
pub mod factory;

pub use error::{PolygonError, Result};
pub use factory::{ClassFactory, ClassMetadata, ExportedClass, PolygonFactory};

/// Registered name of the interface every shape plugin is exported under
pub const BASE_CLASS_TYPE: &str = "polygon_base::RegularPolygon";

/// Capability set shared by every regular polygon plugin
pub trait RegularPolygon: Send + Sync {
    /// Store the side length. Calling it again replaces the stored value.
    fn initialize(&mut self, side_length: f64) -> Result<()>;

    /// Area computed from the stored side length
    fn area(&self) -> Result<f64>;

    /// Stored side length, `None` until initialized
    fn side_length(&self) -> Option<f64>;

    /// Registered class type of the concrete variant
    fn class_type(&self) -> &'static str;
}

/// Check a side length before it is stored.
///
/// Zero is a degenerate but valid polygon; negative and non-finite values
/// are rejected.
pub fn validate_side_length(side_length: f64) -> Result<f64> {
    if !side_length.is_finite() || side_length < 0.0 {
        return Err(PolygonError::InvalidArgument { side_length });
    }
    Ok(side_length)
}

/// Export a shape type under [`RegularPolygon`] with its registered class
/// type and an optional description.
///
/// ```ignore
/// export_class!(Triangle, "polygon_plugins::Triangle", "An equilateral triangle");
/// ```
#[macro_export]
macro_rules! export_class {
    ($ty:ty, $class_type:expr, $description:expr) => {
        impl $crate::ExportedClass for $ty {
            const CLASS_TYPE: &'static str = $class_type;
            const DESCRIPTION: &'static str = $description;
        }
    };
    ($ty:ty, $class_type:expr) => {
        $crate::export_class!($ty, $class_type, "");
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_side_length() {
        assert_eq!(validate_side_length(2.5).unwrap(), 2.5);
        assert_eq!(validate_side_length(0.0).unwrap(), 0.0);

        assert!(matches!(
            validate_side_length(-1.0),
            Err(PolygonError::InvalidArgument { .. })
        ));
        assert!(validate_side_length(f64::NAN).is_err());
        assert!(validate_side_length(f64::INFINITY).is_err());
    }
}
