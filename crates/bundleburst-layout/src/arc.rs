//! Annular sectors for painting a layout.
//!
//! Radii go through a square-root transform so that the drawn area of a ring,
//! not its thickness, grows linearly with depth. Angles follow the usual
//! sunburst convention: zero at twelve o'clock, increasing clockwise.

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::Serialize;

use crate::partition::{PartitionLayout, Segment};

/// One drawable ring segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sector {
    /// Start angle in radians.
    pub start_angle: f64,
    /// End angle in radians.
    pub end_angle: f64,
    /// Inner radius in pixels.
    pub inner_radius: f64,
    /// Outer radius in pixels.
    pub outer_radius: f64,
}

impl Sector {
    /// Angle swept by the sector.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Mid-point of the sector in screen coordinates (y down) relative to the
    /// chart centre.
    pub fn centroid(&self) -> (f64, f64) {
        let r = (self.inner_radius + self.outer_radius) / 2.0;
        let a = (self.start_angle + self.end_angle) / 2.0 - FRAC_PI_2;
        (a.cos() * r, a.sin() * r)
    }

    /// Whether a polar point falls inside the sector.
    pub fn contains(&self, angle: f64, distance: f64) -> bool {
        angle >= self.start_angle
            && angle < self.end_angle
            && distance >= self.inner_radius
            && distance < self.outer_radius
    }
}

/// Convert a point relative to the chart centre (y down) to `(angle, distance)`.
pub fn to_polar(x: f64, y: f64) -> (f64, f64) {
    let angle = x.atan2(-y).rem_euclid(TAU);
    (angle, x.hypot(y))
}

/// Maps layout coordinates onto a circle of a given pixel radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    radius: f64,
    radial_extent: f64,
}

impl ArcGeometry {
    /// Geometry for a layout computed with a normalized radial extent.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            radial_extent: 1.0,
        }
    }

    /// Geometry matching whatever radial extent the layout was computed with.
    pub fn for_layout(layout: &PartitionLayout, radius: f64) -> Self {
        Self {
            radius,
            radial_extent: layout.config().radial_extent,
        }
    }

    /// Outer radius of the chart in pixels.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Pixel radius for a radial coordinate.
    pub fn radius_at(&self, y: f64) -> f64 {
        (y / self.radial_extent).max(0.0).sqrt() * self.radius
    }

    /// Sector for a segment.
    pub fn sector(&self, segment: &Segment) -> Sector {
        Sector {
            start_angle: segment.x0,
            end_angle: segment.x1,
            inner_radius: self.radius_at(segment.y0),
            outer_radius: self.radius_at(segment.y1),
        }
    }

    /// Deepest drawn segment under a point relative to the chart centre.
    pub fn hit_test<'a>(&self, layout: &'a PartitionLayout, x: f64, y: f64) -> Option<&'a Segment> {
        let (angle, distance) = to_polar(x, y);
        layout
            .drawn()
            .filter(|segment| self.sector(segment).contains(angle, distance))
            .max_by_key(|segment| segment.depth)
    }
}
