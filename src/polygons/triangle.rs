//! Equilateral triangle plugin

use polygon_base::{
    export_class, validate_side_length, ExportedClass, PolygonError, RegularPolygon, Result,
};

/// Equilateral triangle
#[derive(Debug, Clone, Default)]
pub struct Triangle {
    side_length: Option<f64>,
}

impl Triangle {
    /// Height of the triangle
    pub fn height(&self) -> Result<f64> {
        Ok(3f64.sqrt() * self.stored()? / 2.0)
    }

    fn stored(&self) -> Result<f64> {
        self.side_length.ok_or(PolygonError::NotInitialized {
            class_type: Self::CLASS_TYPE,
        })
    }
}

impl RegularPolygon for Triangle {
    fn initialize(&mut self, side_length: f64) -> Result<()> {
        self.side_length = Some(validate_side_length(side_length)?);
        Ok(())
    }

    fn area(&self) -> Result<f64> {
        Ok(0.5 * self.stored()? * self.height()?)
    }

    fn side_length(&self) -> Option<f64> {
        self.side_length
    }

    fn class_type(&self) -> &'static str {
        Self::CLASS_TYPE
    }
}

export_class!(Triangle, "polygon_plugins::Triangle", "An equilateral triangle");
