// Copyright 2025 the Handlebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handlebox Gesture: touch interpretation for handle-driven item editing.
//!
//! This crate turns a stream of touch and pinch callbacks into mutations of a
//! [`handlebox_geometry::TransformableItem`]. Its pieces are:
//!
//! - [`GestureSession`]: transient state of one touch (what it grabbed, where
//!   it was last frame, the aspect ratio captured at the start).
//! - [`GestureInterpreter`]: the per-item state machine that classifies a
//!   touch-down by hit testing, then produces one [`Command`] per event.
//! - [`Stage`]: routes `(item id, point)` callbacks to interpreters, applies
//!   commands, emits [`StageEvent`]s for the render layer and defers
//!   deletion to the next turn of the event loop.
//!
//! The crate does not assume any UI toolkit. Platform code forwards touch
//! phases in a shared parent coordinate space and draws the returned
//! [`RenderFrame`]s.
//!
//! ## Driving an interpreter directly
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use handlebox_geometry::{Corner, TransformableItem};
//! use handlebox_gesture::{Command, GestureInterpreter};
//!
//! let mut item = TransformableItem::new(Rect::new(0.0, 0.0, 120.0, 320.0));
//! let mut interp = GestureInterpreter::default();
//! interp.set_editing(true);
//!
//! // Grab the bottom-right handle and drag it 20pt to the right.
//! let begin = interp.touch_begin(&item, Point::new(120.0, 320.0));
//! assert_eq!(begin, Some(Command::BeginResize(Corner::BottomRight)));
//! begin.unwrap().apply(&mut item);
//!
//! if let Some(cmd) = interp.touch_move(&item, Point::new(140.0, 320.0)) {
//!     cmd.apply(&mut item);
//! }
//! if let Some(cmd) = interp.touch_end() {
//!     cmd.apply(&mut item);
//! }
//! assert!((item.size().width - 140.0).abs() < 1e-9);
//! ```
//!
//! ## Features
//!
//! - `log` (default): report classification, session ends and rejected
//!   pinch steps through the `log` facade.
//! - `serde`: (de)serialize [`EngineConfig`].
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod command;
mod config;
mod interpreter;
mod session;
mod stage;

pub use command::Command;
pub use config::EngineConfig;
pub use interpreter::{GestureInterpreter, InterpreterState};
pub use session::{ActiveHandle, GestureKind, GestureSession, PinchProgress};
pub use stage::{RenderFrame, Stage, StageEvent};
