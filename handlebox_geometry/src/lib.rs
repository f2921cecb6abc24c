// Copyright 2025 the Handlebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handlebox Geometry: the affine model behind handle-driven item editing.
//!
//! This crate provides a small, headless model of one on-screen item (an
//! image, a sticker, a text box) that the user can resize from its corners,
//! rotate, pinch-scale and move. It focuses on:
//! - The item's geometry: untransformed size, a normalized anchor point and a
//!   [`kurbo::Affine`] from local space into the parent.
//! - Coordinate conversion between local and parent space.
//! - Placement of the six handles (four corners, rotate, delete) so they stay
//!   glued to the transformed frame.
//! - Hit testing a touch against the handles and the frame.
//!
//! It does **not** own any view tree, gesture recognizer or renderer.
//! Gesture interpretation lives in `handlebox_gesture`; callers draw the
//! item and the handles from the values computed here.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Vec2};
//! use handlebox_geometry::{Corner, Handle, HandleLayout, TransformableItem};
//!
//! let mut item = TransformableItem::new(Rect::new(0.0, 0.0, 120.0, 320.0));
//! let aspect_ratio = item.size().width / item.size().height;
//!
//! // Drag the bottom-right corner: the top-left corner is pinned.
//! item.begin_resize(Corner::BottomRight);
//! item.resize(Corner::BottomRight, Vec2::new(20.0, 0.0), aspect_ratio);
//! item.end_resize();
//!
//! assert!((item.size().width - 140.0).abs() < 1e-9);
//! let handles = HandleLayout::default().layout(&item);
//! let top_left = handles.center(Handle::TopLeft);
//! assert!(top_left.x.abs() < 1e-9 && top_left.y.abs() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - Local space has its origin at the item's anchor point. At rest the
//!   anchor is the center; a resize pins the corner opposite the dragged one.
//! - Moving the anchor never moves the item, so a pinned corner stays exactly
//!   in place under any rotation or scale.
//! - Nothing here fails: out-of-range input is clamped or ignored and the
//!   mutating operations report whether anything changed.
//!
//! This crate is `no_std`.

#![no_std]

mod config;
mod handles;
mod hit;
mod item;
mod mapper;

pub use config::{HandleMetrics, HitParams, SizeLimits};
pub use handles::{Handle, HandleAppearance, HandleLayout, HandleSet, HandleVisibility};
pub use hit::{HitTarget, hit_test};
pub use item::{CENTER_ANCHOR, Corner, DEFAULT_MIN_SCALE, TransformableItem};
pub use mapper::{CoordinateMapper, rotation_delta};
