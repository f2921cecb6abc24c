// Copyright 2025 the Handlebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Size, Vec2};

/// Bounds on the untransformed size an item may be resized to.
///
/// Limits are applied by [`crate::TransformableItem::resize`]; construction
/// and the other operations never change the size.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SizeLimits {
    /// Smallest allowed width and height.
    pub min: Size,
    /// Largest allowed width and height.
    pub max: Size,
}

impl SizeLimits {
    /// Creates limits from a minimum and maximum size.
    ///
    /// Each axis is normalized so that `min <= max`.
    #[must_use]
    pub fn new(min: Size, max: Size) -> Self {
        Self {
            min: Size::new(min.width.min(max.width), min.height.min(max.height)),
            max: Size::new(min.width.max(max.width), min.height.max(max.height)),
        }
    }

    /// Clamps a width into `[min.width, max.width]`.
    #[must_use]
    pub fn clamp_width(&self, width: f64) -> f64 {
        width.clamp(self.min.width, self.max.width)
    }

    /// Clamps a height into `[min.height, max.height]`.
    #[must_use]
    pub fn clamp_height(&self, height: f64) -> f64 {
        height.clamp(self.min.height, self.max.height)
    }

    /// Returns `true` if `size` lies within the limits on both axes.
    #[must_use]
    pub fn contains(&self, size: Size) -> bool {
        (self.min.width..=self.max.width).contains(&size.width)
            && (self.min.height..=self.max.height).contains(&size.height)
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            min: Size::new(60.0, 160.0),
            max: Size::new(195.0, 520.0),
        }
    }
}

/// Visual sizes and offsets of the handle shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HandleMetrics {
    /// Diameter of the four corner handles.
    pub corner_diameter: f64,
    /// Diameter of the handle under an active resize drag.
    pub emphasized_diameter: f64,
    /// Diameter of the rotate and delete handles.
    pub action_diameter: f64,
    /// Outline width of a handle at rest.
    pub stroke_width: f64,
    /// Opacity of the handle under an active resize drag.
    pub emphasized_opacity: f64,
    /// Offset of the rotate/delete handles from the middle of the right edge.
    ///
    /// The rotate handle sits at `(right + x, mid_y - y)` and the delete
    /// handle at `(right + x, mid_y + y)`, both in untransformed local space.
    pub action_offset: Vec2,
}

impl Default for HandleMetrics {
    fn default() -> Self {
        Self {
            corner_diameter: 20.0,
            emphasized_diameter: 80.0,
            action_diameter: 40.0,
            stroke_width: 6.0,
            emphasized_opacity: 0.5,
            action_offset: Vec2::new(40.0, 30.0),
        }
    }
}

/// Tunables for classifying a touch against an item and its handles.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitParams {
    /// Extra distance around handle circles, corners and edges that still counts as a hit.
    pub proximity_tolerance: f64,
    /// Largest total movement for which a touch still counts as a tap.
    pub tap_slop: f64,
    /// Whether the transformed frame's corners and edges are hit-testable in
    /// addition to the handle circles.
    pub edge_hits: bool,
}

impl Default for HitParams {
    fn default() -> Self {
        Self {
            proximity_tolerance: 10.0,
            tap_slop: 10.0,
            edge_hits: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::SizeLimits;

    #[test]
    fn new_normalizes_swapped_bounds() {
        let limits = SizeLimits::new(Size::new(200.0, 10.0), Size::new(100.0, 50.0));
        assert_eq!(limits.min, Size::new(100.0, 10.0));
        assert_eq!(limits.max, Size::new(200.0, 50.0));
    }

    #[test]
    fn default_limits_match_prototype_aspect() {
        let limits = SizeLimits::default();
        let aspect = 120.0 / 320.0;
        assert!((limits.max.width / aspect - limits.max.height).abs() < 1e-9);
        assert!((limits.min.width / aspect - limits.min.height).abs() < 1e-9);
        assert!(limits.contains(Size::new(120.0, 320.0)));
        assert!(!limits.contains(Size::new(200.0, 320.0)));
    }
}
