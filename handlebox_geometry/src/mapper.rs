// Copyright 2025 the Handlebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion between an item's local space and its parent's space.
//!
//! Local space is the item's untransformed space with the origin at its
//! pivot (the anchor point). The item transform maps local space into the
//! parent; with the anchor at the center this is "offset from the center,
//! apply the transform, re-offset by the center".

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Vec2};

/// Determinants smaller than this are treated as non-invertible.
const SINGULAR_EPSILON: f64 = 1e-12;

/// Cached forward and inverse mapping for one item state.
///
/// A mapper is a snapshot: it must be rebuilt after the item is mutated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    local_to_parent: Affine,
    parent_to_local: Affine,
}

impl CoordinateMapper {
    /// Builds a mapper from an item transform (local → parent).
    ///
    /// If the transform is singular, parent points map back to the local origin.
    #[must_use]
    pub fn new(local_to_parent: Affine) -> Self {
        let parent_to_local = if local_to_parent.determinant().abs() < SINGULAR_EPSILON {
            Affine::new([0.0; 6])
        } else {
            local_to_parent.inverse()
        };
        Self {
            local_to_parent,
            parent_to_local,
        }
    }

    /// Returns the local → parent transform.
    #[must_use]
    pub fn local_to_parent(&self) -> Affine {
        self.local_to_parent
    }

    /// Returns the parent → local transform.
    #[must_use]
    pub fn parent_to_local(&self) -> Affine {
        self.parent_to_local
    }

    /// Maps a local point to its on-screen position in the parent.
    #[must_use]
    pub fn to_parent_space(&self, local: Point) -> Point {
        self.local_to_parent * local
    }

    /// Maps a parent point into the item's local space.
    #[must_use]
    pub fn to_local_space(&self, parent: Point) -> Point {
        self.parent_to_local * parent
    }

    /// Maps a parent-space displacement into local space, ignoring translation.
    #[must_use]
    pub fn vector_to_local(&self, v: Vec2) -> Vec2 {
        apply_linear(self.parent_to_local, v)
    }

    /// Maps a local displacement into parent space, ignoring translation.
    #[must_use]
    pub fn vector_to_parent(&self, v: Vec2) -> Vec2 {
        apply_linear(self.local_to_parent, v)
    }
}

/// Applies only the linear (2×2) part of `affine` to `v`.
pub(crate) fn apply_linear(affine: Affine, v: Vec2) -> Vec2 {
    let [a, b, c, d, _, _] = affine.as_coeffs();
    Vec2::new(a * v.x + c * v.y, b * v.x + d * v.y)
}

/// Rotation to apply when a drag around `center` moves from `previous` to `current`.
///
/// The vectors from the center are fed to `atan2` with the x component in
/// the numerator, so the result is `atan2(prev.x, prev.y) - atan2(curr.x, curr.y)`.
/// In a y-down parent space this turns the item the same way the finger went.
/// A point that coincides with the center contributes an angle of zero.
#[must_use]
pub fn rotation_delta(center: Point, previous: Point, current: Point) -> f64 {
    let prev = previous - center;
    let curr = current - center;
    prev.x.atan2(prev.y) - curr.x.atan2(curr.y)
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;

    use kurbo::{Affine, Point, Vec2};

    use super::{CoordinateMapper, rotation_delta};

    #[test]
    fn identity_about_center_is_pure_translation() {
        let center = Point::new(90.0, 290.0);
        let mapper = CoordinateMapper::new(Affine::translate(center.to_vec2()));

        let local = Point::new(-60.0, -160.0);
        assert_eq!(mapper.to_parent_space(local), Point::new(30.0, 130.0));
        assert_eq!(mapper.to_local_space(Point::new(30.0, 130.0)), local);
    }

    #[test]
    fn rotated_scaled_roundtrip() {
        let t = Affine::translate((200.0, 100.0)) * Affine::rotate(0.7) * Affine::scale(1.6);
        let mapper = CoordinateMapper::new(t);

        let local = Point::new(12.5, -40.0);
        let back = mapper.to_local_space(mapper.to_parent_space(local));
        assert!((back.x - local.x).abs() < 1e-9);
        assert!((back.y - local.y).abs() < 1e-9);
    }

    #[test]
    fn vectors_ignore_translation() {
        let t = Affine::translate((500.0, -20.0)) * Affine::scale(2.0);
        let mapper = CoordinateMapper::new(t);

        assert_eq!(mapper.vector_to_parent(Vec2::new(1.0, 3.0)), Vec2::new(2.0, 6.0));
        assert_eq!(mapper.vector_to_local(Vec2::new(2.0, 6.0)), Vec2::new(1.0, 3.0));
    }

    #[test]
    fn singular_transform_maps_to_origin() {
        let mapper = CoordinateMapper::new(Affine::scale(0.0));
        assert_eq!(mapper.to_local_space(Point::new(3.0, 4.0)), Point::ZERO);
    }

    #[test]
    fn rotation_delta_quarter_turn() {
        let center = Point::new(50.0, 50.0);
        let angle = rotation_delta(center, Point::new(60.0, 50.0), Point::new(50.0, 60.0));
        assert!((angle - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn rotation_delta_follows_the_finger() {
        // Dragging from the right of the center to below it (y-down) should
        // rotate the item's +x axis onto +y.
        let center = Point::ZERO;
        let angle = rotation_delta(center, Point::new(10.0, 0.0), Point::new(0.0, 10.0));
        let turned = Affine::rotate(angle) * Point::new(1.0, 0.0);
        assert!(turned.x.abs() < 1e-12);
        assert!((turned.y - 1.0).abs() < 1e-12);
    }
}
