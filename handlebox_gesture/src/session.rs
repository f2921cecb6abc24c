// Copyright 2025 the Handlebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transient state of one touch or pinch, from begin to end or cancel.
//!
//! ## Usage
//!
//! 1) Create a session on touch-down with [`GestureSession::new`].
//! 2) On each move, call [`GestureSession::update`] to get the delta since the previous location.
//! 3) On touch-up, [`GestureSession::is_tap`] tells whether the touch barely moved.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use handlebox_gesture::{ActiveHandle, GestureSession};
//!
//! let mut session = GestureSession::new(ActiveHandle::Move, Point::new(10.0, 20.0), 1.0);
//!
//! assert_eq!(session.update(Point::new(15.0, 25.0)), Vec2::new(5.0, 5.0));
//! assert_eq!(session.update(Point::new(16.0, 25.0)), Vec2::new(1.0, 0.0));
//! assert_eq!(session.total_offset(), Vec2::new(6.0, 5.0));
//! assert!(session.is_tap(10.0));
//! ```

use handlebox_geometry::{Corner, Handle};
use kurbo::{Point, Vec2};

/// What a session is manipulating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveHandle {
    /// Nothing matched; the touch can only become a tap.
    None,
    /// A corner resize.
    Corner(Corner),
    /// The rotate handle.
    Rotate,
    /// The item body.
    Move,
    /// A two-finger pinch.
    Pinch,
    /// The delete handle; a tap on it asks for confirmation.
    Delete,
}

impl ActiveHandle {
    /// The transform kind this handle drives, if any.
    #[must_use]
    pub fn kind(self) -> Option<GestureKind> {
        match self {
            Self::Corner(corner) => Some(GestureKind::Resize(corner)),
            Self::Rotate => Some(GestureKind::Rotate),
            Self::Move => Some(GestureKind::Move),
            Self::Pinch => Some(GestureKind::Pinch),
            Self::None | Self::Delete => None,
        }
    }
}

impl From<Handle> for ActiveHandle {
    fn from(handle: Handle) -> Self {
        match handle {
            Handle::Rotate => Self::Rotate,
            Handle::Delete => Self::Delete,
            _ => handle.corner().map_or(Self::None, Self::Corner),
        }
    }
}

/// The transform an active session applies on every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    /// Anchor-relative resize from a corner.
    Resize(Corner),
    /// Rotation by the angle swept around the item center.
    Rotate,
    /// Uniform pinch scale.
    Pinch,
    /// Free translation.
    Move,
}

/// Scale bookkeeping for a pinch session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchProgress {
    /// Uniform scale of the item when the pinch began.
    pub start_scale: f64,
    /// Cumulative pinch scale already applied to the item.
    pub applied: f64,
}

/// State of one active touch or pinch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSession {
    /// What the session is manipulating.
    pub active: ActiveHandle,
    /// Parent-space location where the touch began.
    pub start_location: Point,
    /// Parent-space location of the previous frame.
    pub previous_location: Point,
    /// Width / height of the item when the session began.
    pub original_aspect_ratio: f64,
    /// Present only for pinch sessions.
    pub pinch: Option<PinchProgress>,
}

impl GestureSession {
    /// Starts a session at `location`.
    #[must_use]
    pub fn new(active: ActiveHandle, location: Point, original_aspect_ratio: f64) -> Self {
        Self {
            active,
            start_location: location,
            previous_location: location,
            original_aspect_ratio,
            pinch: None,
        }
    }

    /// Starts a pinch session for an item currently at `start_scale`.
    #[must_use]
    pub fn pinch(start_scale: f64, original_aspect_ratio: f64) -> Self {
        Self {
            pinch: Some(PinchProgress {
                start_scale,
                applied: 1.0,
            }),
            ..Self::new(ActiveHandle::Pinch, Point::ZERO, original_aspect_ratio)
        }
    }

    /// Overrides the reference point for the first delta.
    #[must_use]
    pub fn with_previous_location(mut self, location: Point) -> Self {
        self.previous_location = location;
        self
    }

    /// Records a new location, returning the movement since the previous one.
    pub fn update(&mut self, location: Point) -> Vec2 {
        let delta = location - self.previous_location;
        self.previous_location = location;
        delta
    }

    /// Movement from the start location to the most recent location.
    #[must_use]
    pub fn total_offset(&self) -> Vec2 {
        self.previous_location - self.start_location
    }

    /// Returns `true` if the touch has stayed within `slop` of where it began.
    #[must_use]
    pub fn is_tap(&self, slop: f64) -> bool {
        self.total_offset().hypot() <= slop
    }
}
