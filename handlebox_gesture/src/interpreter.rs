// Copyright 2025 the Handlebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-item gesture state machine.
//!
//! States run `Idle → Classifying → Active(kind) → Idle`. Classification
//! happens synchronously inside [`GestureInterpreter::touch_begin`], so
//! callers only ever observe `Idle` or `Active` between events.
//!
//! Only one session exists at a time: a touch or pinch that begins while
//! another is in progress is ignored.

use handlebox_geometry::{
    Handle, HandleLayout, HandleSet, HandleVisibility, HitTarget, TransformableItem, hit_test,
    rotation_delta,
};
use kurbo::{Point, Vec2};

use crate::command::Command;
use crate::config::EngineConfig;
use crate::session::{ActiveHandle, GestureKind, GestureSession};

/// Observable state of a [`GestureInterpreter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InterpreterState {
    /// No transform in progress. A tap candidate may still be tracked.
    #[default]
    Idle,
    /// A touch-down is being hit-tested.
    Classifying,
    /// A transform gesture is in progress.
    Active(GestureKind),
}

/// Turns touch and pinch events for one item into [`Command`]s.
///
/// The interpreter reads the item to classify touches and compute deltas but
/// never mutates it; callers apply the returned command.
#[derive(Clone, Debug)]
pub struct GestureInterpreter {
    config: EngineConfig,
    layout: HandleLayout,
    state: InterpreterState,
    session: Option<GestureSession>,
    editing: bool,
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl GestureInterpreter {
    /// Creates an idle interpreter with editing mode off.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            layout: HandleLayout::new(config.metrics),
            state: InterpreterState::Idle,
            session: None,
            editing: false,
        }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> InterpreterState {
        self.state
    }

    /// The session in progress, if any.
    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Whether editing mode (handles and border) is on.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Forces editing mode on or off.
    pub fn set_editing(&mut self, editing: bool) {
        self.editing = editing;
    }

    /// Which handles should be drawn right now.
    #[must_use]
    pub fn visibility(&self) -> HandleVisibility {
        match self.state {
            InterpreterState::Active(GestureKind::Resize(corner)) => {
                HandleVisibility::Emphasized(Handle::from(corner))
            }
            InterpreterState::Active(GestureKind::Pinch) => HandleVisibility::Hidden,
            InterpreterState::Active(GestureKind::Rotate) => HandleVisibility::Shown,
            _ if self.editing => HandleVisibility::Shown,
            _ => HandleVisibility::Hidden,
        }
    }

    /// Whether the selection border should be drawn.
    #[must_use]
    pub fn shows_border(&self) -> bool {
        self.editing && self.visibility() != HandleVisibility::Hidden
    }

    /// Lays out the handles of `item` with the current visibility.
    #[must_use]
    pub fn handles(&self, item: &TransformableItem) -> HandleSet {
        self.layout.layout(item).with_visibility(self.visibility())
    }

    /// Handles a touch-down at a parent-space point.
    ///
    /// Returns [`Command::BeginResize`] when a corner is grabbed.
    pub fn touch_begin(&mut self, item: &TransformableItem, point: Point) -> Option<Command> {
        if self.session.is_some() {
            #[cfg(feature = "log")]
            log::trace!("ignoring touch at {point:?}: a session is already active");
            return None;
        }

        self.state = InterpreterState::Classifying;
        let handles = self.handles(item);
        let active = match hit_test(item, &handles, point, &self.config.hit) {
            Some(HitTarget::Handle(handle)) => ActiveHandle::from(handle),
            Some(HitTarget::Frame(corner)) => ActiveHandle::Corner(corner),
            Some(HitTarget::Body) => ActiveHandle::Move,
            None => ActiveHandle::None,
        };

        let mut session = GestureSession::new(active, point, aspect_ratio(item));
        if active == ActiveHandle::Rotate {
            session = session.with_previous_location(handles.center(Handle::Rotate));
        }
        self.session = Some(session);
        self.state = active
            .kind()
            .map_or(InterpreterState::Idle, InterpreterState::Active);

        #[cfg(feature = "log")]
        log::debug!("touch at {point:?} classified as {active:?}");

        match active {
            ActiveHandle::Corner(corner) => Some(Command::BeginResize(corner)),
            _ => None,
        }
    }

    /// Handles a touch moving to a new parent-space point.
    ///
    /// Non-finite points are dropped without touching the session, so the
    /// next valid point is measured from the last valid one.
    pub fn touch_move(&mut self, item: &TransformableItem, point: Point) -> Option<Command> {
        let session = self.session.as_mut()?;
        if session.active == ActiveHandle::Pinch {
            return None;
        }
        if !point.is_finite() {
            #[cfg(feature = "log")]
            log::trace!("ignoring non-finite touch at {point:?}");
            return None;
        }

        let previous = session.previous_location;
        let delta = session.update(point);
        if delta == Vec2::ZERO {
            return None;
        }

        match session.active {
            ActiveHandle::Corner(corner) => Some(Command::Resize {
                corner,
                delta,
                aspect_ratio: session.original_aspect_ratio,
            }),
            ActiveHandle::Rotate => {
                let angle = rotation_delta(item.center(), previous, point);
                (angle != 0.0).then_some(Command::Rotate(angle))
            }
            ActiveHandle::Move => Some(Command::Translate(delta)),
            ActiveHandle::None | ActiveHandle::Delete | ActiveHandle::Pinch => None,
        }
    }

    /// Handles the touch lifting.
    ///
    /// A touch that stayed within the tap slop toggles editing mode (on the
    /// body or outside the item) or requests deletion (on the delete handle).
    /// Any other transform turns editing mode on.
    pub fn touch_end(&mut self) -> Option<Command> {
        let session = self.take_touch_session()?;
        let tap = session.is_tap(self.config.hit.tap_slop);

        #[cfg(feature = "log")]
        log::debug!(
            "touch on {:?} ended after {:?} (tap: {tap})",
            session.active,
            session.total_offset()
        );

        match session.active {
            ActiveHandle::None => tap.then(|| self.toggle_editing()),
            ActiveHandle::Delete => tap.then_some(Command::RequestDelete),
            ActiveHandle::Move if tap => Some(self.toggle_editing()),
            ActiveHandle::Corner(_) => {
                self.editing = true;
                Some(Command::EndResize)
            }
            ActiveHandle::Move | ActiveHandle::Rotate | ActiveHandle::Pinch => {
                self.editing = true;
                None
            }
        }
    }

    /// Handles the touch being cancelled by the platform.
    ///
    /// The session is discarded without tap semantics; whatever was applied
    /// per frame stays applied.
    pub fn touch_cancel(&mut self) -> Option<Command> {
        let session = self.take_touch_session()?;

        #[cfg(feature = "log")]
        log::debug!("touch on {:?} cancelled", session.active);

        match session.active {
            ActiveHandle::Corner(_) => {
                self.editing = true;
                Some(Command::EndResize)
            }
            ActiveHandle::Move | ActiveHandle::Rotate | ActiveHandle::Pinch => {
                self.editing = true;
                None
            }
            ActiveHandle::None | ActiveHandle::Delete => None,
        }
    }

    /// Starts a pinch. Returns `false` if another session is active.
    pub fn pinch_begin(&mut self, item: &TransformableItem) -> bool {
        if self.session.is_some() {
            #[cfg(feature = "log")]
            log::trace!("ignoring pinch: a session is already active");
            return false;
        }
        self.session = Some(GestureSession::pinch(
            item.uniform_scale(),
            aspect_ratio(item),
        ));
        self.state = InterpreterState::Active(GestureKind::Pinch);
        true
    }

    /// Handles a pinch update carrying the cumulative scale since the pinch began.
    ///
    /// The part of `scale` not yet applied is proposed as a [`Command::Scale`].
    /// A proposal that would take the item below the scale floor is dropped
    /// and stays pending, so a later update that comes back above the floor
    /// applies it in one step.
    pub fn pinch_change(&mut self, item: &TransformableItem, scale: f64) -> Option<Command> {
        let min_scale = self.config.min_scale;
        let progress = self.session.as_mut()?.pinch.as_mut()?;
        if !scale.is_finite() || scale <= 0.0 {
            return None;
        }

        let factor = scale / progress.applied;
        if factor == 1.0 {
            return None;
        }
        let proposed = item.uniform_scale() * factor;
        let floor = min_scale * progress.start_scale.max(1.0);
        if proposed < floor || !item.can_scale(factor) {
            #[cfg(feature = "log")]
            log::trace!("pinch to {proposed} rejected, floor is {floor}");
            return None;
        }

        progress.applied = scale;
        Some(Command::Scale(factor))
    }

    /// Ends a pinch. Returns `false` if no pinch was active.
    pub fn pinch_end(&mut self) -> bool {
        if !matches!(self.session, Some(s) if s.active == ActiveHandle::Pinch) {
            return false;
        }
        self.session = None;
        self.state = InterpreterState::Idle;
        self.editing = true;
        true
    }

    fn take_touch_session(&mut self) -> Option<GestureSession> {
        match self.session {
            Some(session) if session.active != ActiveHandle::Pinch => {
                self.session = None;
                self.state = InterpreterState::Idle;
                Some(session)
            }
            _ => None,
        }
    }

    fn toggle_editing(&mut self) -> Command {
        self.editing = !self.editing;
        Command::SetEditing(self.editing)
    }
}

fn aspect_ratio(item: &TransformableItem) -> f64 {
    let size = item.size();
    if size.height > 0.0 {
        size.width / size.height
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use handlebox_geometry::{Corner, HandleVisibility, TransformableItem};
    use kurbo::{Point, Rect};

    use super::{GestureInterpreter, InterpreterState};
    use crate::command::Command;
    use crate::session::GestureKind;

    fn item() -> TransformableItem {
        TransformableItem::new(Rect::new(0.0, 0.0, 120.0, 320.0))
    }

    #[test]
    fn starts_idle_and_hidden() {
        let interp = GestureInterpreter::default();
        assert_eq!(interp.state(), InterpreterState::Idle);
        assert_eq!(interp.visibility(), HandleVisibility::Hidden);
        assert!(!interp.shows_border());
    }

    #[test]
    fn corner_grab_emphasizes_that_handle() {
        let item = item();
        let mut interp = GestureInterpreter::default();
        interp.set_editing(true);

        let cmd = interp.touch_begin(&item, Point::new(121.0, 321.0));
        assert_eq!(cmd, Some(Command::BeginResize(Corner::BottomRight)));
        assert_eq!(
            interp.state(),
            InterpreterState::Active(GestureKind::Resize(Corner::BottomRight))
        );
        assert_eq!(
            interp.visibility(),
            HandleVisibility::Emphasized(handlebox_geometry::Handle::BottomRight)
        );

        assert_eq!(interp.touch_end(), Some(Command::EndResize));
        assert_eq!(interp.visibility(), HandleVisibility::Shown);
    }

    #[test]
    fn hidden_handles_cannot_be_grabbed() {
        let item = item();
        let mut interp = GestureInterpreter::default();

        // Editing is off, so the corner is just part of the body.
        assert_eq!(interp.touch_begin(&item, Point::new(119.0, 319.0)), None);
        assert_eq!(interp.state(), InterpreterState::Active(GestureKind::Move));
    }

    #[test]
    fn second_touch_is_ignored() {
        let item = item();
        let mut interp = GestureInterpreter::default();
        interp.touch_begin(&item, Point::new(60.0, 160.0));
        let first = *interp.session().unwrap();

        assert_eq!(interp.touch_begin(&item, Point::new(500.0, 500.0)), None);
        assert_eq!(interp.session(), Some(&first));
        assert!(!interp.pinch_begin(&item));
    }

    #[test]
    fn touch_end_without_session_is_a_noop() {
        let mut interp = GestureInterpreter::default();
        assert_eq!(interp.touch_end(), None);
        assert_eq!(interp.touch_cancel(), None);
        assert!(!interp.pinch_end());
    }
}
