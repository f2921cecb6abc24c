// Copyright 2025 the Handlebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handle positions derived from an item's transformed geometry.
//!
//! [`HandleLayout::layout`] is a pure function of the item: it places the
//! six handles on the untransformed frame and maps them into the parent.
//! A [`HandleSet`] is recomputed after every mutation, never patched.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use handlebox_geometry::{Handle, HandleLayout, TransformableItem};
//!
//! let item = TransformableItem::new(Rect::new(0.0, 0.0, 120.0, 320.0));
//! let handles = HandleLayout::default().layout(&item);
//!
//! assert_eq!(handles.center(Handle::TopLeft), Point::new(0.0, 0.0));
//! assert_eq!(handles.center(Handle::Rotate), Point::new(160.0, 130.0));
//! assert_eq!(handles.center(Handle::Delete), Point::new(160.0, 190.0));
//! ```

use kurbo::Point;

use crate::config::HandleMetrics;
use crate::item::{Corner, TransformableItem};

/// One of the six interactive handles around an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Handle {
    /// Top-left resize handle.
    TopLeft,
    /// Top-right resize handle.
    TopRight,
    /// Bottom-left resize handle.
    BottomLeft,
    /// Bottom-right resize handle.
    BottomRight,
    /// Rotate handle, outside the right edge above its middle.
    Rotate,
    /// Delete handle, outside the right edge below its middle.
    Delete,
}

impl Handle {
    /// All handles in declaration (and hit-testing) order.
    pub const ALL: [Self; 6] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
        Self::Rotate,
        Self::Delete,
    ];

    /// The corner this handle resizes, if it is a corner handle.
    #[must_use]
    pub fn corner(self) -> Option<Corner> {
        match self {
            Self::TopLeft => Some(Corner::TopLeft),
            Self::TopRight => Some(Corner::TopRight),
            Self::BottomLeft => Some(Corner::BottomLeft),
            Self::BottomRight => Some(Corner::BottomRight),
            Self::Rotate | Self::Delete => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl From<Corner> for Handle {
    fn from(corner: Corner) -> Self {
        match corner {
            Corner::TopLeft => Self::TopLeft,
            Corner::TopRight => Self::TopRight,
            Corner::BottomLeft => Self::BottomLeft,
            Corner::BottomRight => Self::BottomRight,
        }
    }
}

/// Which handles are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HandleVisibility {
    /// No handles are drawn.
    #[default]
    Hidden,
    /// All handles are drawn at rest.
    Shown,
    /// Only the given handle is drawn, enlarged and translucent.
    Emphasized(Handle),
}

/// How a single handle should be rendered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandleAppearance {
    /// Whether the handle is drawn at all.
    pub visible: bool,
    /// Diameter of the handle circle.
    pub diameter: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Outline width.
    pub stroke_width: f64,
}

/// Parent-space centers of all six handles plus their visibility.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandleSet {
    centers: [Point; 6],
    visibility: HandleVisibility,
    metrics: HandleMetrics,
}

impl HandleSet {
    /// Returns a copy with a different visibility.
    #[must_use]
    pub fn with_visibility(mut self, visibility: HandleVisibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Parent-space center of `handle`.
    #[must_use]
    pub fn center(&self, handle: Handle) -> Point {
        self.centers[handle.index()]
    }

    /// Iterates over `(handle, center)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, Point)> + '_ {
        Handle::ALL.into_iter().map(|h| (h, self.center(h)))
    }

    /// Current visibility.
    #[must_use]
    pub fn visibility(&self) -> HandleVisibility {
        self.visibility
    }

    /// Whether `handle` is drawn.
    #[must_use]
    pub fn is_visible(&self, handle: Handle) -> bool {
        match self.visibility {
            HandleVisibility::Hidden => false,
            HandleVisibility::Shown => true,
            HandleVisibility::Emphasized(active) => active == handle,
        }
    }

    /// Diameter of `handle` when drawn at rest.
    #[must_use]
    pub fn rest_diameter(&self, handle: Handle) -> f64 {
        match handle {
            Handle::Rotate | Handle::Delete => self.metrics.action_diameter,
            _ => self.metrics.corner_diameter,
        }
    }

    /// Rendering parameters for `handle`.
    #[must_use]
    pub fn appearance(&self, handle: Handle) -> HandleAppearance {
        let visible = self.is_visible(handle);
        if self.visibility == HandleVisibility::Emphasized(handle) {
            HandleAppearance {
                visible,
                diameter: self.metrics.emphasized_diameter,
                opacity: self.metrics.emphasized_opacity,
                stroke_width: self.metrics.stroke_width,
            }
        } else {
            HandleAppearance {
                visible,
                diameter: self.rest_diameter(handle),
                opacity: 1.0,
                stroke_width: self.metrics.stroke_width,
            }
        }
    }

    /// Metrics the set was laid out with.
    #[must_use]
    pub fn metrics(&self) -> HandleMetrics {
        self.metrics
    }
}

/// Computes [`HandleSet`]s from item geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandleLayout {
    metrics: HandleMetrics,
}

impl HandleLayout {
    /// Creates a layout with the given metrics.
    #[must_use]
    pub fn new(metrics: HandleMetrics) -> Self {
        Self { metrics }
    }

    /// Metrics used for placement and appearance.
    #[must_use]
    pub fn metrics(&self) -> HandleMetrics {
        self.metrics
    }

    /// Lays out all handles for `item`, shown at rest.
    #[must_use]
    pub fn layout(&self, item: &TransformableItem) -> HandleSet {
        let mapper = item.mapper();
        let frame = item.base_frame();
        let offset = self.metrics.action_offset;
        let mid_y = frame.y0 + frame.height() / 2.0;

        let rotate = Point::new(frame.x1 + offset.x, mid_y - offset.y);
        let delete = Point::new(frame.x1 + offset.x, mid_y + offset.y);

        let centers = [
            item.local_corner(Corner::TopLeft),
            item.local_corner(Corner::TopRight),
            item.local_corner(Corner::BottomLeft),
            item.local_corner(Corner::BottomRight),
            rotate,
            delete,
        ]
        .map(|p| mapper.to_parent_space(p));

        HandleSet {
            centers,
            visibility: HandleVisibility::Shown,
            metrics: self.metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::PI;

    use kurbo::{Point, Rect};

    use super::{Handle, HandleLayout, HandleVisibility};
    use crate::item::{Corner, TransformableItem};

    #[test]
    fn layout_is_deterministic() {
        let mut item = TransformableItem::new(Rect::new(10.0, 20.0, 130.0, 340.0));
        item.rotate(0.4);
        let layout = HandleLayout::default();
        assert_eq!(layout.layout(&item), layout.layout(&item));
    }

    #[test]
    fn corner_handles_follow_corners() {
        let mut item = TransformableItem::new(Rect::new(10.0, 20.0, 130.0, 340.0));
        item.rotate(1.0);
        item.scale(1.5);
        let handles = HandleLayout::default().layout(&item);
        for corner in Corner::ALL {
            let a = handles.center(Handle::from(corner));
            let b = item.corner(corner);
            assert!((a - b).hypot() < 1e-9);
        }
    }

    #[test]
    fn action_handles_rotate_with_item() {
        let mut item = TransformableItem::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        item.rotate(PI);
        let handles = HandleLayout::default().layout(&item);
        // Half a turn about (50, 50): the right edge is now on the left.
        let rotate = handles.center(Handle::Rotate);
        assert!((rotate.x - -40.0).abs() < 1e-9);
        assert!((rotate.y - 80.0).abs() < 1e-9);
    }

    #[test]
    fn emphasized_handle_is_the_only_visible_one() {
        let item = TransformableItem::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let handles = HandleLayout::default()
            .layout(&item)
            .with_visibility(HandleVisibility::Emphasized(Handle::BottomLeft));

        for handle in Handle::ALL {
            assert_eq!(handles.is_visible(handle), handle == Handle::BottomLeft);
        }
        let look = handles.appearance(Handle::BottomLeft);
        assert_eq!(look.diameter, 80.0);
        assert!(look.opacity < 1.0);

        let rest = handles
            .with_visibility(HandleVisibility::Shown)
            .appearance(Handle::Rotate);
        assert_eq!(rest.diameter, 40.0);
        assert_eq!(rest.opacity, 1.0);
        assert_eq!(rest.stroke_width, 6.0);
    }

    #[test]
    fn handles_iterate_in_declaration_order() {
        let item = TransformableItem::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        let handles = HandleLayout::default().layout(&item);
        assert!(handles.iter().map(|(h, _)| h).eq(Handle::ALL));
        assert_eq!(handles.center(Handle::BottomRight), Point::new(10.0, 10.0));
    }
}
