//! Layout configuration.

use std::f64::consts::TAU;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Segments narrower than this many radians are not worth drawing.
pub const DEFAULT_MIN_ANGULAR_WIDTH: f64 = 0.005;

/// Configuration for the partition layout.
#[derive(Debug, Clone, Copy, PartialEq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct LayoutConfig {
    /// Total angle shared out among the root's children.
    #[builder(default = "TAU")]
    #[serde(default = "default_angular_extent")]
    pub angular_extent: f64,

    /// Total radial extent. `1.0` keeps `y` normalized; pass `radius²` to lay
    /// out directly in the painter's squared-radius space.
    #[builder(default = "1.0")]
    #[serde(default = "default_radial_extent")]
    pub radial_extent: f64,

    /// Minimum angular width (radians) for a segment to count as visible.
    #[builder(default = "DEFAULT_MIN_ANGULAR_WIDTH")]
    #[serde(default = "default_min_angular_width")]
    pub min_angular_width: f64,
}

fn default_angular_extent() -> f64 {
    TAU
}

fn default_radial_extent() -> f64 {
    1.0
}

fn default_min_angular_width() -> f64 {
    DEFAULT_MIN_ANGULAR_WIDTH
}

impl LayoutConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(extent) = self.angular_extent {
            if !(extent > 0.0 && extent.is_finite()) {
                return Err("Angular extent must be positive and finite".to_string());
            }
        }
        if let Some(extent) = self.radial_extent {
            if !(extent > 0.0 && extent.is_finite()) {
                return Err("Radial extent must be positive and finite".to_string());
            }
        }
        if let Some(width) = self.min_angular_width {
            if width < 0.0 {
                return Err("Minimum angular width cannot be negative".to_string());
            }
        }
        Ok(())
    }
}

impl LayoutConfig {
    /// Create a new layout config builder.
    pub fn builder() -> LayoutConfigBuilder {
        LayoutConfigBuilder::default()
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            angular_extent: TAU,
            radial_extent: 1.0,
            min_angular_width: DEFAULT_MIN_ANGULAR_WIDTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.angular_extent, TAU);
        assert_eq!(config.radial_extent, 1.0);
        assert_eq!(config.min_angular_width, 0.005);
        assert_eq!(LayoutConfig::builder().build().unwrap(), config);
    }

    #[test]
    fn test_builder_validation() {
        assert!(LayoutConfig::builder().radial_extent(0.0).build().is_err());
        assert!(LayoutConfig::builder().angular_extent(-1.0).build().is_err());
        assert!(LayoutConfig::builder().min_angular_width(-0.1).build().is_err());

        let config = LayoutConfig::builder()
            .radial_extent(250.0 * 250.0)
            .build()
            .unwrap();
        assert_eq!(config.radial_extent, 62500.0);
    }
}
