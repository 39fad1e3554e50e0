//! Point type and related functionality

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// A planar point in double precision, used for pivots and planar math
pub type Point2d = Point2<f64>;

/// A planar vector in double precision
pub type Vector2d = Vector2<f64>;

/// A surveyed point with an optional elevation
///
/// When `z` is `None` every z-dependent effect of a transformation is skipped
/// and the point stays two-dimensional through the whole chain. A `z` of `0.0`
/// is a real elevation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Point {
    /// Create a planar point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Create a point with an elevation
    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Whether the point carries a z coordinate
    pub fn has_z(&self) -> bool {
        self.z.is_some()
    }

    /// Planar part of the point
    pub fn xy(&self) -> Point2d {
        Point2d::new(self.x, self.y)
    }

    /// Replace the planar part, keeping z untouched
    pub fn set_xy(&mut self, xy: Point2d) {
        self.x = xy.x;
        self.y = xy.y;
    }

    /// Format every coordinate with a fixed number of decimal digits
    pub fn format(&self, digits: usize) -> FormattedPoint {
        FormattedPoint {
            x: format!("{:.*}", digits, self.x),
            y: format!("{:.*}", digits, self.y),
            z: self.z.map(|z| format!("{:.*}", digits, z)),
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.z {
            Some(z) => write!(f, "({}, {}, {})", self.x, self.y, z),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}

/// Textual coordinates produced by [`Point::format`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedPoint {
    pub x: String,
    pub y: String,
    pub z: Option<String>,
}
