// Copyright 2025 the Handlebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Classifying a parent-space touch against an item and its handles.
//!
//! The order of the checks is fixed:
//! 1. Visible handle circles, in [`Handle::ALL`] order. The hit radius is
//!    the drawn radius plus [`HitParams::proximity_tolerance`].
//! 2. When handles are visible and [`HitParams::edge_hits`] is set, the
//!    transformed corners and then the transformed edges, within the same
//!    tolerance. An edge hit resolves to the nearer end corner.
//! 3. The inside of the transformed frame.
//!
//! The first match wins.

use kurbo::{Line, ParamCurveNearest, Point};

use crate::config::HitParams;
use crate::handles::{Handle, HandleSet, HandleVisibility};
use crate::item::{Corner, TransformableItem};

/// What a touch landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    /// One of the handle circles.
    Handle(Handle),
    /// Near a corner or edge of the transformed frame, resolved to a corner.
    Frame(Corner),
    /// Inside the transformed frame.
    Body,
}

/// Edges of the frame as pairs of corners, clockwise from the top.
const EDGES: [(Corner, Corner); 4] = [
    (Corner::TopLeft, Corner::TopRight),
    (Corner::TopRight, Corner::BottomRight),
    (Corner::BottomRight, Corner::BottomLeft),
    (Corner::BottomLeft, Corner::TopLeft),
];

/// Hit-tests `point` against `item` and its laid-out `handles`.
///
/// Returns `None` when the touch misses the item entirely.
#[must_use]
pub fn hit_test(
    item: &TransformableItem,
    handles: &HandleSet,
    point: Point,
    params: &HitParams,
) -> Option<HitTarget> {
    let tolerance = params.proximity_tolerance.max(0.0);

    for (handle, center) in handles.iter() {
        if !handles.is_visible(handle) {
            continue;
        }
        let radius = handles.appearance(handle).diameter / 2.0 + tolerance;
        if (point - center).hypot() <= radius {
            return Some(HitTarget::Handle(handle));
        }
    }

    if params.edge_hits
        && handles.visibility() != HandleVisibility::Hidden
        && let Some(corner) = frame_hit(item, point, tolerance)
    {
        return Some(HitTarget::Frame(corner));
    }

    item.contains(point).then_some(HitTarget::Body)
}

fn frame_hit(item: &TransformableItem, point: Point, tolerance: f64) -> Option<Corner> {
    for corner in Corner::ALL {
        if (point - item.corner(corner)).hypot() <= tolerance {
            return Some(corner);
        }
    }

    let limit_sq = tolerance * tolerance;
    for (start, end) in EDGES {
        let (p0, p1) = (item.corner(start), item.corner(end));
        let nearest = Line::new(p0, p1).nearest(point, 0.);
        if nearest.distance_sq <= limit_sq {
            return Some(if nearest.t <= 0.5 { start } else { end });
        }
    }
    None
}
