//! Shape plugins exported under `polygon_base::RegularPolygon`

use polygon_base::{ClassFactory, PolygonFactory};

pub mod square;
pub mod triangle;


pub use square::Square;
pub use triangle::Triangle;

/// Factories for every shape this crate exports
pub fn exported_classes() -> Vec<Box<dyn PolygonFactory>> {
    vec![
        Box::new(ClassFactory::<Triangle>::new()),
        Box::new(ClassFactory::<Square>::new()),
    ]
}
