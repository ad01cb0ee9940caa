//! Square plugin

use polygon_base::{
    export_class, validate_side_length, ExportedClass, PolygonError, RegularPolygon, Result,
};

/// Square
#[derive(Debug, Clone, Default)]
pub struct Square {
    side_length: Option<f64>,
}

impl RegularPolygon for Square {
    fn initialize(&mut self, side_length: f64) -> Result<()> {
        self.side_length = Some(validate_side_length(side_length)?);
        Ok(())
    }

    fn area(&self) -> Result<f64> {
        let side_length = self.side_length.ok_or(PolygonError::NotInitialized {
            class_type: Self::CLASS_TYPE,
        })?;
        Ok(side_length * side_length)
    }

    fn side_length(&self) -> Option<f64> {
        self.side_length
    }

    fn class_type(&self) -> &'static str {
        Self::CLASS_TYPE
    }
}

export_class!(Square, "polygon_plugins::Square", "A square");
