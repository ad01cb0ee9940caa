//! Settings for the `demo` command

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Demo configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Side length every demo shape is initialized with
    pub side_length: f64,

    /// Classes to instantiate, by lookup name or class type
    pub classes: Vec<String>,
}

impl DemoConfig {
    /// Validate the demo settings
    pub fn validate(&self) -> Result<()> {
        if !self.side_length.is_finite() || self.side_length < 0.0 {
            return Err(anyhow!(
                "Demo side length must be a finite, non-negative number, got {}",
                self.side_length
            ));
        }

        if self.classes.is_empty() {
            return Err(anyhow!("At least one demo class must be configured"));
        }

        Ok(())
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            side_length: 10.0,
            classes: vec![
                "polygon_plugins/Triangle".to_string(),
                "polygon_plugins/Square".to_string(),
            ],
        }
    }
}
