// Copyright 2025 the Handlebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use handlebox_geometry::{Corner, TransformableItem};
use kurbo::Vec2;

/// A mutation produced by the [`crate::GestureInterpreter`].
///
/// Geometric commands are applied to an item with [`Command::apply`]; the
/// others are notifications for the owner of the item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Pin the corner opposite the dragged one before the first resize delta.
    BeginResize(Corner),
    /// Resize from a corner by a parent-space delta.
    Resize {
        /// Corner being dragged.
        corner: Corner,
        /// Parent-space movement since the previous frame.
        delta: Vec2,
        /// Width / height captured when the drag began.
        aspect_ratio: f64,
    },
    /// Return the anchor to the center after a resize.
    EndResize,
    /// Rotate by an angle in radians.
    Rotate(f64),
    /// Scale uniformly by a factor.
    Scale(f64),
    /// Move by a parent-space delta.
    Translate(Vec2),
    /// Editing mode was switched to the given value.
    SetEditing(bool),
    /// The delete handle was tapped; ask the user to confirm.
    RequestDelete,
}

impl Command {
    /// Applies the command to `item`, returning `true` if its geometry changed.
    ///
    /// Anchor moves never change geometry, and notifications leave the item alone.
    pub fn apply(self, item: &mut TransformableItem) -> bool {
        match self {
            Self::BeginResize(corner) => {
                item.begin_resize(corner);
                false
            }
            Self::Resize {
                corner,
                delta,
                aspect_ratio,
            } => item.resize(corner, delta, aspect_ratio),
            Self::EndResize => {
                item.end_resize();
                false
            }
            Self::Rotate(angle) => item.rotate(angle),
            Self::Scale(factor) => item.scale(factor),
            Self::Translate(delta) => item.translate(delta),
            Self::SetEditing(_) | Self::RequestDelete => false,
        }
    }

    /// Returns `true` for commands that can change an item's geometry.
    #[must_use]
    pub fn is_geometric(&self) -> bool {
        !matches!(self, Self::SetEditing(_) | Self::RequestDelete)
    }
}
