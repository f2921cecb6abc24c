// Copyright 2025 the Handlebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::config::SizeLimits;
use crate::mapper::CoordinateMapper;

/// Default floor on the uniform scale factor of an item's transform.
pub const DEFAULT_MIN_SCALE: f64 = 0.7;

/// Normalized anchor of an item at rest.
pub const CENTER_ANCHOR: Point = Point::new(0.5, 0.5);

/// One of the four corners of an item's frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Corner {
    /// Minimum x, minimum y.
    TopLeft,
    /// Maximum x, minimum y.
    TopRight,
    /// Minimum x, maximum y.
    BottomLeft,
    /// Maximum x, maximum y.
    BottomRight,
}

impl Corner {
    /// All corners in hit-testing order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Position of this corner in normalized `[0, 1] × [0, 1]` item space.
    #[must_use]
    pub fn unit(self) -> Point {
        match self {
            Self::TopLeft => Point::new(0.0, 0.0),
            Self::TopRight => Point::new(1.0, 0.0),
            Self::BottomLeft => Point::new(0.0, 1.0),
            Self::BottomRight => Point::new(1.0, 1.0),
        }
    }

    /// The diagonally opposite corner.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomRight,
            Self::TopRight => Self::BottomLeft,
            Self::BottomLeft => Self::TopRight,
            Self::BottomRight => Self::TopLeft,
        }
    }

    /// Returns `true` for the corners on the left edge.
    #[must_use]
    pub fn is_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }
}

/// Geometry of a single item that can be resized, rotated, scaled and moved.
///
/// The item is described by its untransformed size, a normalized anchor point
/// and an affine transform from local space into the parent. Local space has
/// its origin at the anchor, so [`TransformableItem::base_frame`] always
/// contains the origin and the transform's translation is the anchor's
/// position in the parent.
///
/// All operations clamp or ignore out-of-range input; they report whether the
/// item changed instead of failing.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformableItem {
    size: Size,
    anchor: Point,
    transform: Affine,
    limits: SizeLimits,
    min_scale: f64,
}

impl TransformableItem {
    /// Creates an item occupying `frame` in its parent.
    ///
    /// The anchor starts at the center and the transform is a pure
    /// translation to the frame's center. The size is not clamped; limits
    /// only bound what [`TransformableItem::resize`] produces.
    #[must_use]
    pub fn new(frame: Rect) -> Self {
        let frame = frame.abs();
        Self {
            size: frame.size(),
            anchor: CENTER_ANCHOR,
            transform: Affine::translate(frame.center().to_vec2()),
            limits: SizeLimits::default(),
            min_scale: DEFAULT_MIN_SCALE,
        }
    }

    /// Replaces the resize limits.
    #[must_use]
    pub fn with_limits(mut self, limits: SizeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Replaces the floor on the transform's uniform scale.
    #[must_use]
    pub fn with_min_scale(mut self, min_scale: f64) -> Self {
        self.min_scale = min_scale.max(0.0);
        self
    }

    /// Untransformed size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Normalized anchor point.
    #[must_use]
    pub fn anchor_point(&self) -> Point {
        self.anchor
    }

    /// Transform from local space into the parent.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Resize limits.
    #[must_use]
    pub fn limits(&self) -> SizeLimits {
        self.limits
    }

    /// Floor on the transform's uniform scale.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// The untransformed frame in local space.
    ///
    /// Its origin is `-anchor * size`, so the anchor sits at the local origin.
    #[must_use]
    pub fn base_frame(&self) -> Rect {
        let origin = Point::new(
            -self.anchor.x * self.size.width,
            -self.anchor.y * self.size.height,
        );
        Rect::from_origin_size(origin, self.size)
    }

    /// Mapper for the current state.
    #[must_use]
    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.transform)
    }

    /// Center of the item in parent space.
    #[must_use]
    pub fn center(&self) -> Point {
        self.transform * self.base_frame().center()
    }

    /// Local position of `corner`.
    #[must_use]
    pub fn local_corner(&self, corner: Corner) -> Point {
        let frame = self.base_frame();
        let unit = corner.unit();
        Point::new(
            frame.x0 + unit.x * frame.width(),
            frame.y0 + unit.y * frame.height(),
        )
    }

    /// Parent-space position of `corner`.
    #[must_use]
    pub fn corner(&self, corner: Corner) -> Point {
        self.transform * self.local_corner(corner)
    }

    /// Parent-space positions of all corners, in [`Corner::ALL`] order.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        Corner::ALL.map(|c| self.corner(c))
    }

    /// Axis-aligned parent-space bounds of the transformed frame.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        let [p0, p1, p2, p3] = self.corners();
        Rect::new(
            p0.x.min(p1.x).min(p2.x).min(p3.x),
            p0.y.min(p1.y).min(p2.y).min(p3.y),
            p0.x.max(p1.x).max(p2.x).max(p3.x),
            p0.y.max(p1.y).max(p2.y).max(p3.y),
        )
    }

    /// Returns `true` if the parent point lies inside the transformed frame.
    #[must_use]
    pub fn contains(&self, parent: Point) -> bool {
        let local = self.mapper().to_local_space(parent);
        let frame = self.base_frame();
        (frame.x0..=frame.x1).contains(&local.x) && (frame.y0..=frame.y1).contains(&local.y)
    }

    /// Uniform scale factor of the transform, `sqrt(|det|)`.
    #[must_use]
    pub fn uniform_scale(&self) -> f64 {
        self.transform.determinant().abs().sqrt()
    }

    /// Rotation of the local x axis in parent space, in radians.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        let [a, b, _, _, _, _] = self.transform.as_coeffs();
        b.atan2(a)
    }

    /// Moves the anchor to a new normalized position without moving the item.
    ///
    /// The transform is post-multiplied by the local offset between the old
    /// and new anchor, so every parent-space point of the item stays put.
    pub fn set_anchor_point(&mut self, anchor: Point) {
        if anchor == self.anchor {
            return;
        }
        let offset = Vec2::new(
            (anchor.x - self.anchor.x) * self.size.width,
            (anchor.y - self.anchor.y) * self.size.height,
        );
        self.transform = self.transform * Affine::translate(offset);
        self.anchor = anchor;
    }

    /// Pins the corner diagonally opposite `corner` ahead of a resize drag.
    pub fn begin_resize(&mut self, corner: Corner) {
        self.set_anchor_point(corner.opposite().unit());
    }

    /// Returns the anchor to the center after a resize drag.
    pub fn end_resize(&mut self) {
        self.set_anchor_point(CENTER_ANCHOR);
    }

    /// Resizes the item by dragging `corner` by a parent-space `delta`.
    ///
    /// The delta is projected onto the local x axis; left-side corners shrink
    /// as they move right, right-side corners grow. The new height follows
    /// from the clamped width and `aspect_ratio` (width / height), and both
    /// dimensions are clamped into [`SizeLimits`]. A non-positive or
    /// non-finite `aspect_ratio` falls back to the current one.
    ///
    /// Returns `true` if the size changed.
    pub fn resize(&mut self, corner: Corner, delta: Vec2, aspect_ratio: f64) -> bool {
        if !delta.is_finite() {
            return false;
        }
        let aspect_ratio = if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            aspect_ratio
        } else if self.size.height > 0.0 {
            self.size.width / self.size.height
        } else {
            return false;
        };

        let local = self.mapper().vector_to_local(delta);
        let dx = if corner.is_left() { -local.x } else { local.x };

        let width = self.limits.clamp_width(self.size.width + dx);
        let height = self.limits.clamp_height(width / aspect_ratio);
        let size = Size::new(width, height);
        if size == self.size {
            return false;
        }
        self.size = size;
        true
    }

    /// Rotates the item by `angle` radians about its anchor.
    ///
    /// Returns `false` for a zero or non-finite angle.
    pub fn rotate(&mut self, angle: f64) -> bool {
        if angle == 0.0 || !angle.is_finite() {
            return false;
        }
        self.transform = self.transform * Affine::rotate(angle);
        true
    }

    /// Returns `true` if scaling by `factor` would be accepted.
    #[must_use]
    pub fn can_scale(&self, factor: f64) -> bool {
        factor.is_finite() && factor > 0.0 && self.uniform_scale() * factor >= self.min_scale
    }

    /// Scales the item uniformly by `factor` about its anchor.
    ///
    /// The request is dropped if the resulting uniform scale would fall below
    /// the configured minimum. Returns `true` if the transform changed.
    pub fn scale(&mut self, factor: f64) -> bool {
        if factor == 1.0 || !self.can_scale(factor) {
            return false;
        }
        self.transform = self.transform * Affine::scale(factor);
        true
    }

    /// Moves the item by a parent-space `delta`.
    pub fn translate(&mut self, delta: Vec2) -> bool {
        if delta == Vec2::ZERO || !delta.is_finite() {
            return false;
        }
        self.transform = self.transform.then_translate(delta);
        true
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_4;

    use kurbo::{Point, Rect, Size, Vec2};

    use super::{Corner, TransformableItem};

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn new_item_is_centered_on_frame() {
        let item = TransformableItem::new(Rect::new(30.0, 130.0, 150.0, 450.0));
        assert_eq!(item.size(), Size::new(120.0, 320.0));
        assert_close(item.center(), Point::new(90.0, 290.0));
        assert_close(item.corner(Corner::TopLeft), Point::new(30.0, 130.0));
        assert_close(item.corner(Corner::BottomRight), Point::new(150.0, 450.0));
        assert_eq!(item.base_frame(), Rect::new(-60.0, -160.0, 60.0, 160.0));
    }

    #[test]
    fn anchor_change_keeps_geometry() {
        let mut item = TransformableItem::new(Rect::new(0.0, 0.0, 120.0, 320.0));
        item.rotate(FRAC_PI_4);
        item.scale(1.3);
        let before = item.corners();

        item.set_anchor_point(Point::new(1.0, 0.0));
        for (a, b) in before.iter().zip(item.corners()) {
            assert_close(*a, b);
        }
        assert_close(item.transform() * Point::ZERO, before[1]);
    }

    #[test]
    fn resize_right_corner_grows() {
        let mut item = TransformableItem::new(Rect::new(0.0, 0.0, 120.0, 320.0));
        item.begin_resize(Corner::BottomRight);
        assert!(item.resize(Corner::BottomRight, Vec2::new(20.0, 5.0), 0.375));
        assert!((item.size().width - 140.0).abs() < 1e-9);
        assert!((item.size().height - 140.0 / 0.375).abs() < 1e-9);
        assert_close(item.corner(Corner::TopLeft), Point::ZERO);
    }

    #[test]
    fn resize_left_corner_shrinks_when_moving_right() {
        let mut item = TransformableItem::new(Rect::new(0.0, 0.0, 120.0, 320.0));
        item.begin_resize(Corner::TopLeft);
        assert!(item.resize(Corner::TopLeft, Vec2::new(10.0, 0.0), 0.375));
        assert!((item.size().width - 110.0).abs() < 1e-9);
        assert_close(item.corner(Corner::BottomRight), Point::new(120.0, 320.0));
    }

    #[test]
    fn resize_saturates_at_limits() {
        let mut item = TransformableItem::new(Rect::new(0.0, 0.0, 120.0, 320.0));
        item.begin_resize(Corner::BottomRight);
        item.resize(Corner::BottomRight, Vec2::new(1000.0, 0.0), 0.375);
        assert_eq!(item.size(), Size::new(195.0, 520.0));
        assert!(!item.resize(Corner::BottomRight, Vec2::new(10.0, 0.0), 0.375));

        item.resize(Corner::BottomRight, Vec2::new(-1000.0, 0.0), 0.375);
        assert_eq!(item.size(), Size::new(60.0, 160.0));
    }

    #[test]
    fn resize_delta_is_projected_on_local_axis() {
        let mut item = TransformableItem::new(Rect::new(0.0, 0.0, 120.0, 320.0));
        item.rotate(core::f64::consts::FRAC_PI_2);
        item.begin_resize(Corner::BottomRight);
        // Local +x now points down in the parent; a horizontal drag does nothing.
        assert!(!item.resize(Corner::BottomRight, Vec2::new(30.0, 0.0), 0.375));
        assert!(item.resize(Corner::BottomRight, Vec2::new(0.0, 30.0), 0.375));
        assert!((item.size().width - 150.0).abs() < 1e-9);
    }

    #[test]
    fn scale_floor_rejects_small_factors() {
        let mut item = TransformableItem::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(!item.scale(0.5));
        assert!((item.uniform_scale() - 1.0).abs() < 1e-12);
        assert!(item.scale(0.8));
        assert!(!item.scale(0.8));
        assert!((item.uniform_scale() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn scale_and_rotate_pivot_on_center() {
        let mut item = TransformableItem::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        item.scale(2.0);
        item.rotate(1.1);
        assert_close(item.center(), Point::new(50.0, 50.0));
        assert!((item.rotation() - 1.1).abs() < 1e-12);
    }

    #[test]
    fn translate_moves_everything() {
        let mut item = TransformableItem::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        item.rotate(0.3);
        let before = item.corners();
        assert!(item.translate(Vec2::new(7.0, -3.0)));
        for (a, b) in before.iter().zip(item.corners()) {
            assert_close(*a + Vec2::new(7.0, -3.0), b);
        }
        assert!(!item.translate(Vec2::ZERO));
    }

    #[test]
    fn contains_respects_rotation() {
        let mut item = TransformableItem::new(Rect::new(0.0, 0.0, 100.0, 20.0));
        assert!(item.contains(Point::new(90.0, 10.0)));
        item.rotate(core::f64::consts::FRAC_PI_2);
        assert!(!item.contains(Point::new(90.0, 10.0)));
        assert!(item.contains(Point::new(50.0, 50.0)));
    }
}
