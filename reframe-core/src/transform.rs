//! Planar/elevation transformations and transformation chains

use crate::error::{Error, Result};
use crate::point::{Point, Point2d, Vector2d};
use nalgebra::Rotation2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A primitive transformation that can be applied to a [`Point`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Transform {
    /// Additive offset. `dz` is only applied to points with an elevation.
    Translation { dx: f64, dy: f64, dz: f64 },
    /// Counter-clockwise rotation of `angle` degrees about `(xc, yc)`.
    Rotation { angle: f64, xc: f64, yc: f64 },
    /// Scaling about `(xc, yc)`: `kh` on x/y, `kv` on z.
    Homothecy { kh: f64, kv: f64, xc: f64, yc: f64 },
}

impl Transform {
    /// Create a translation
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Transform::Translation { dx, dy, dz }
    }

    /// Create a rotation, angle in degrees
    pub fn rotation(angle: f64, xc: f64, yc: f64) -> Self {
        Transform::Rotation { angle, xc, yc }
    }

    /// Create a homothecy
    pub fn homothecy(kh: f64, kv: f64, xc: f64, yc: f64) -> Self {
        Transform::Homothecy { kh, kv, xc, yc }
    }

    /// Name of the transformation kind, as written in configuration files
    pub fn kind(&self) -> &'static str {
        match self {
            Transform::Translation { .. } => "Translation",
            Transform::Rotation { .. } => "Rotation",
            Transform::Homothecy { .. } => "Homothecy",
        }
    }

    /// Apply the transformation to a point in place
    pub fn apply(&self, point: &mut Point) {
        match *self {
            Transform::Translation { dx, dy, dz } => {
                point.x += dx;
                point.y += dy;
                if let Some(z) = point.z.as_mut() {
                    *z += dz;
                }
            }
            Transform::Rotation { angle, xc, yc } => {
                let center = Point2d::new(xc, yc);
                let rotation = Rotation2::new(angle.to_radians());
                point.set_xy(center + rotation * (point.xy() - center));
            }
            Transform::Homothecy { kh, kv, xc, yc } => {
                let center = Point2d::new(xc, yc);
                let offset: Vector2d = point.xy() - center;
                point.set_xy(center + offset * kh);
                if let Some(z) = point.z.as_mut() {
                    *z *= kv;
                }
            }
        }
    }

    /// Apply the transformation and return the moved point
    pub fn applied(&self, mut point: Point) -> Point {
        self.apply(&mut point);
        point
    }

    /// Get the inverse transformation
    ///
    /// Fails with [`Error::DivisionByZero`] for a homothecy with a zero ratio.
    pub fn inverse(&self) -> Result<Self> {
        match *self {
            Transform::Translation { dx, dy, dz } => Ok(Transform::Translation {
                dx: -dx,
                dy: -dy,
                dz: -dz,
            }),
            Transform::Rotation { angle, xc, yc } => Ok(Transform::Rotation {
                angle: -angle,
                xc,
                yc,
            }),
            Transform::Homothecy { kh, kv, xc, yc } => {
                if kh == 0.0 || kv == 0.0 {
                    return Err(Error::DivisionByZero(self.to_string()));
                }
                Ok(Transform::Homothecy {
                    kh: 1.0 / kh,
                    kv: 1.0 / kv,
                    xc,
                    yc,
                })
            }
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Translation { dx, dy, dz } => {
                write!(f, "Translation(dx={}, dy={}, dz={})", dx, dy, dz)
            }
            Transform::Rotation { angle, xc, yc } => {
                write!(f, "Rotation(angle={}, center=({}, {}))", angle, xc, yc)
            }
            Transform::Homothecy { kh, kv, xc, yc } => {
                write!(f, "Homothecy(kh={}, kv={}, center=({}, {}))", kh, kv, xc, yc)
            }
        }
    }
}

/// An ordered sequence of transformations, applied first to last
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransformChain {
    pub transforms: Vec<Transform>,
}

impl TransformChain {
    /// Create an empty (identity) chain
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Create a chain from a list of transformations
    pub fn from_transforms(transforms: Vec<Transform>) -> Self {
        Self { transforms }
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transform> {
        self.transforms.iter()
    }

    /// Apply every transformation in order, each one seeing the output of the previous
    pub fn apply(&self, point: &mut Point) {
        for transform in &self.transforms {
            transform.apply(point);
        }
    }

    /// Apply the chain and return the moved point
    pub fn applied(&self, mut point: Point) -> Point {
        self.apply(&mut point);
        point
    }

    /// Get the inverse chain: every element inverted, order reversed
    pub fn inverse(&self) -> Result<Self> {
        self.transforms
            .iter()
            .rev()
            .map(Transform::inverse)
            .collect::<Result<Vec<_>>>()
            .map(Self::from_transforms)
    }

    /// Compose this chain with another one applied afterwards
    pub fn then(mut self, other: &TransformChain) -> Self {
        self.transforms.extend_from_slice(&other.transforms);
        self
    }
}

impl From<Vec<Transform>> for TransformChain {
    fn from(transforms: Vec<Transform>) -> Self {
        Self::from_transforms(transforms)
    }
}

impl FromIterator<Transform> for TransformChain {
    fn from_iter<I: IntoIterator<Item = Transform>>(iter: I) -> Self {
        Self {
            transforms: Vec::from_iter(iter),
        }
    }
}

impl<'a> IntoIterator for &'a TransformChain {
    type Item = &'a Transform;
    type IntoIter = std::slice::Iter<'a, Transform>;

    fn into_iter(self) -> Self::IntoIter {
        self.transforms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_point_eq(actual: Point, expected: Point) {
        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-9);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-9);
        match (actual.z, expected.z) {
            (Some(a), Some(e)) => assert_relative_eq!(a, e, epsilon = 1e-9),
            (None, None) => {}
            other => panic!("elevation mismatch: {:?}", other),
        }
    }

    fn round_trip(transform: Transform, point: Point) -> Point {
        let inverse = transform.inverse().unwrap();
        inverse.applied(transform.applied(point))
    }

    #[test]
    fn test_translation_inverse_2d_and_3d() {
        let t = Transform::translation(12.5, -3.0, 7.25);

        let p2 = Point::new(1000.0, -42.0);
        assert_point_eq(round_trip(t, p2), p2);

        let p3 = Point::with_z(1000.0, -42.0, 15.0);
        assert_point_eq(round_trip(t, p3), p3);
    }

    #[test]
    fn test_translation_skips_missing_elevation() {
        let t = Transform::translation(1.0, 2.0, 3.0);
        let moved = t.applied(Point::new(0.0, 0.0));
        assert_eq!(moved, Point::new(1.0, 2.0));

        let moved = t.applied(Point::with_z(0.0, 0.0, 0.0));
        assert_eq!(moved, Point::with_z(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let r = Transform::rotation(90.0, 0.0, 0.0);
        let moved = r.applied(Point::new(100.0, 200.0));
        assert_point_eq(moved, Point::new(-200.0, 100.0));
    }

    #[test]
    fn test_rotation_identities() {
        let p = Point::with_z(12.0, -7.0, 3.0);
        for angle in [0.0, 360.0] {
            let moved = Transform::rotation(angle, 5.0, 5.0).applied(p);
            assert_point_eq(moved, p);
        }

        let r = Transform::rotation(37.0, 4.0, -9.0);
        assert_point_eq(round_trip(r, p), p);

        let pivot = Point::new(4.0, -9.0);
        for angle in [13.0, 90.0, 181.5, -45.0] {
            let moved = Transform::rotation(angle, 4.0, -9.0).applied(pivot);
            assert_point_eq(moved, pivot);
        }
    }

    #[test]
    fn test_rotation_leaves_elevation() {
        let moved = Transform::rotation(45.0, 0.0, 0.0).applied(Point::with_z(1.0, 0.0, 9.0));
        assert_eq!(moved.z, Some(9.0));
    }

    #[test]
    fn test_homothecy_about_center() {
        let h = Transform::homothecy(2.0, 0.5, 1.0, 1.0);
        let moved = h.applied(Point::with_z(3.0, 0.0, 10.0));
        assert_point_eq(moved, Point::with_z(5.0, -1.0, 5.0));

        let p = Point::with_z(-8.0, 3.5, 120.0);
        assert_point_eq(round_trip(h, p), p);
    }

    #[test]
    fn test_homothecy_zero_ratio_cannot_be_inverted() {
        assert!(matches!(
            Transform::homothecy(0.0, 1.0, 0.0, 0.0).inverse(),
            Err(Error::DivisionByZero(_))
        ));
        assert!(matches!(
            Transform::homothecy(1.0, 0.0, 0.0, 0.0).inverse(),
            Err(Error::DivisionByZero(_))
        ));
    }

    #[test]
    fn test_chain_inverse_reverses_order() {
        let chain = TransformChain::from_transforms(vec![
            Transform::translation(100.0, 200.0, 0.0),
            Transform::rotation(90.0, 0.0, 0.0),
        ]);
        let inverse = chain.inverse().unwrap();
        assert_eq!(
            inverse.transforms,
            vec![
                Transform::rotation(-90.0, 0.0, 0.0),
                Transform::translation(-100.0, -200.0, -0.0),
            ]
        );

        let p = Point::new(3.0, 4.0);
        assert_point_eq(inverse.applied(chain.applied(p)), p);
    }

    #[test]
    fn test_chain_applies_in_order() {
        let chain = TransformChain::from_transforms(vec![
            Transform::translation(100.0, 200.0, 0.0),
            Transform::rotation(90.0, 0.0, 0.0),
        ]);
        assert_point_eq(chain.applied(Point::new(0.0, 0.0)), Point::new(-200.0, 100.0));

        let swapped: TransformChain = chain.iter().rev().copied().collect();
        assert_point_eq(swapped.applied(Point::new(0.0, 0.0)), Point::new(100.0, 200.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Transform::rotation(90.0, 0.0, 0.0).to_string(),
            "Rotation(angle=90, center=(0, 0))"
        );
        assert_eq!(
            Transform::translation(1.5, 0.0, 0.0).to_string(),
            "Translation(dx=1.5, dy=0, dz=0)"
        );
    }
}
