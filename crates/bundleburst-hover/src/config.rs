//! Interaction configuration.

use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Breadcrumb chevron dimensions, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreadcrumbStyle {
    /// Width of a chevron before any label text.
    pub base_width: f64,
    /// Chevron height.
    pub height: f64,
    /// Depth of the arrow tip (and of the tail notch).
    pub tip_width: f64,
    /// Horizontal space per label character.
    pub char_width: f64,
    /// Gap between the last chevron and the percentage label.
    pub label_gap: f64,
}

impl Default for BreadcrumbStyle {
    fn default() -> Self {
        Self {
            base_width: 30.0,
            height: 20.0,
            tip_width: 8.0,
            char_width: 7.5,
            label_gap: 15.0,
        }
    }
}

impl BreadcrumbStyle {
    /// Body width of a chevron for a label, excluding the tip.
    pub fn body_width(&self, name: &str) -> f64 {
        self.base_width + label_len(name) as f64 * self.char_width
    }

    /// Horizontal space a chevron takes up in the trail.
    pub fn width(&self, name: &str) -> f64 {
        self.body_width(name) + self.tip_width
    }

    /// Polygon outline of a chevron. Every chevron after the first gets a
    /// notch in its tail so it nests into the previous tip.
    pub fn points(&self, name: &str, index: usize) -> Vec<(f64, f64)> {
        let w = self.body_width(name);
        let h = self.height;
        let mut points = vec![
            (0.0, 0.0),
            (w, 0.0),
            (w + self.tip_width, h / 2.0),
            (w, h),
            (0.0, h),
        ];
        if index > 0 {
            points.push((self.tip_width, h / 2.0));
        }
        points
    }

    /// Anchor of a chevron's label text, relative to the chevron.
    pub fn text_anchor(&self) -> (f64, f64) {
        ((self.base_width + self.tip_width) / 2.0, self.height / 2.0)
    }
}

/// Label length in UTF-16 code units, which is what browsers measure.
fn label_len(name: &str) -> usize {
    name.encode_utf16().count()
}

/// Configuration for the hover controller.
#[derive(Debug, Clone, Copy, PartialEq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct InteractionConfig {
    /// Opacity of segments outside the hovered chain.
    #[builder(default = "0.3")]
    #[serde(default = "default_dimmed_opacity")]
    pub dimmed_opacity: f64,

    /// Time for dimmed segments to return to full opacity after hover-out.
    #[builder(default = "Duration::from_millis(1000)")]
    #[serde(default = "default_fade_duration")]
    pub fade_duration: Duration,

    /// Breadcrumb chevron dimensions.
    #[builder(default)]
    #[serde(default)]
    pub breadcrumb: BreadcrumbStyle,
}

fn default_dimmed_opacity() -> f64 {
    0.3
}

fn default_fade_duration() -> Duration {
    Duration::from_millis(1000)
}

impl InteractionConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(opacity) = self.dimmed_opacity {
            if !(0.0..=1.0).contains(&opacity) {
                return Err("Dimmed opacity must be between 0 and 1".to_string());
            }
        }
        if let Some(ref style) = self.breadcrumb {
            if style.height <= 0.0 || style.base_width < 0.0 || style.char_width < 0.0 {
                return Err("Breadcrumb dimensions must be positive".to_string());
            }
        }
        Ok(())
    }
}

impl InteractionConfig {
    /// Create a new interaction config builder.
    pub fn builder() -> InteractionConfigBuilder {
        InteractionConfigBuilder::default()
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            dimmed_opacity: default_dimmed_opacity(),
            fade_duration: default_fade_duration(),
            breadcrumb: BreadcrumbStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breadcrumb_widths() {
        let style = BreadcrumbStyle::default();
        assert_eq!(style.body_width("abcd"), 60.0);
        assert_eq!(style.width("abcd"), 68.0);
        assert_eq!(style.width(""), 38.0);
        assert_eq!(style.text_anchor(), (19.0, 10.0));
    }

    #[test]
    fn test_breadcrumb_points() {
        let style = BreadcrumbStyle::default();
        let first = style.points("ab", 0);
        assert_eq!(
            first,
            vec![(0.0, 0.0), (45.0, 0.0), (53.0, 10.0), (45.0, 20.0), (0.0, 20.0)]
        );

        let later = style.points("ab", 1);
        assert_eq!(later.len(), 6);
        assert_eq!(later[5], (8.0, 10.0));
    }

    #[test]
    fn test_config_builder() {
        let config = InteractionConfig::builder()
            .dimmed_opacity(0.5)
            .fade_duration(Duration::from_millis(250))
            .build()
            .unwrap();
        assert_eq!(config.dimmed_opacity, 0.5);
        assert_eq!(config.fade_duration, Duration::from_millis(250));
        assert_eq!(config.breadcrumb, BreadcrumbStyle::default());

        assert!(InteractionConfig::builder().dimmed_opacity(1.5).build().is_err());
        assert_eq!(InteractionConfig::builder().build().unwrap(), InteractionConfig::default());
    }
}
