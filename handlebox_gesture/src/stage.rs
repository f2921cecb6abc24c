// Copyright 2025 the Handlebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routing of touch callbacks to items, render output and deferred deletion.
//!
//! A [`Stage`] is the seam between a platform's gesture source and the
//! engine. Each callback names the item it targets, runs that item's
//! [`GestureInterpreter`], applies the resulting [`Command`] and reports what
//! the render layer needs to redraw.
//!
//! Deletion is two-step: tapping the delete handle emits
//! [`StageEvent::ConfirmDelete`]; once the user confirms, the caller calls
//! [`Stage::confirm_delete`], and the item is only removed on the next
//! [`Stage::run_deferred`], never inside a touch callback.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use handlebox_gesture::{EngineConfig, Stage, StageEvent};
//!
//! let mut stage = Stage::new(EngineConfig::default());
//! stage.insert(1_u32, Rect::new(0.0, 0.0, 120.0, 320.0));
//!
//! // A tap on the item turns editing mode on and reveals the handles.
//! stage.on_touch_begin(&1, Point::new(60.0, 160.0));
//! let events = stage.on_touch_end(&1);
//! let StageEvent::Render(frame) = &events[0] else { panic!("expected a render") };
//! assert!(frame.editing);
//! ```

use alloc::vec::Vec;

use handlebox_geometry::{HandleSet, TransformableItem};
use kurbo::{Affine, Point, Rect};

use crate::command::Command;
use crate::config::EngineConfig;
use crate::interpreter::GestureInterpreter;

/// Everything a render layer needs to draw one item and its handles.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame<K> {
    /// Item the frame belongs to.
    pub id: K,
    /// Untransformed frame in the item's local space.
    pub base_frame: Rect,
    /// Local → parent transform to draw the frame with.
    pub transform: Affine,
    /// Handle centers and visibility.
    pub handles: HandleSet,
    /// Whether editing mode is on.
    pub editing: bool,
    /// Whether the selection border is drawn.
    pub border: bool,
}

/// Output of a [`Stage`] callback.
#[derive(Clone, Debug, PartialEq)]
pub enum StageEvent<K> {
    /// Geometry or handle visibility of an item changed.
    Render(RenderFrame<K>),
    /// The delete handle was tapped; the user should be asked to confirm.
    ConfirmDelete(K),
    /// A confirmed deletion was carried out; the item is gone.
    DeleteRequested(K),
}

#[derive(Clone, Debug)]
struct Entry<K> {
    id: K,
    item: TransformableItem,
    interpreter: GestureInterpreter,
}

impl<K: Clone> Entry<K> {
    fn frame(&self) -> RenderFrame<K> {
        RenderFrame {
            id: self.id.clone(),
            base_frame: self.item.base_frame(),
            transform: self.item.transform(),
            handles: self.interpreter.handles(&self.item),
            editing: self.interpreter.is_editing(),
            border: self.interpreter.shows_border(),
        }
    }
}

/// A set of editable items keyed by an application id.
///
/// Ids are compared with `PartialEq`, mirroring how touch callbacks name
/// their target. Items are kept in insertion order.
#[derive(Clone, Debug)]
pub struct Stage<K> {
    config: EngineConfig,
    entries: Vec<Entry<K>>,
    pending_deletes: Vec<K>,
}

impl<K: Clone + PartialEq> Default for Stage<K> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<K: Clone + PartialEq> Stage<K> {
    /// Creates an empty stage.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            pending_deletes: Vec::new(),
        }
    }

    /// The configuration new items are created with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Places a new item occupying `frame` in the parent.
    ///
    /// Returns `false` (and changes nothing) if `id` is already present.
    pub fn insert(&mut self, id: K, frame: Rect) -> bool {
        if self.contains(&id) {
            return false;
        }
        let item = TransformableItem::new(frame)
            .with_limits(self.config.limits)
            .with_min_scale(self.config.min_scale);
        self.entries.push(Entry {
            id,
            item,
            interpreter: GestureInterpreter::new(self.config),
        });
        true
    }

    /// Returns `true` if an item with `id` exists.
    #[must_use]
    pub fn contains(&self, id: &K) -> bool {
        self.entries.iter().any(|e| &e.id == id)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|e| &e.id)
    }

    /// Geometry of an item.
    #[must_use]
    pub fn item(&self, id: &K) -> Option<&TransformableItem> {
        self.entry(id).map(|e| &e.item)
    }

    /// Gesture state of an item.
    #[must_use]
    pub fn interpreter(&self, id: &K) -> Option<&GestureInterpreter> {
        self.entry(id).map(|e| &e.interpreter)
    }

    /// Renders an item on demand.
    #[must_use]
    pub fn frame(&self, id: &K) -> Option<RenderFrame<K>> {
        self.entry(id).map(Entry::frame)
    }

    /// Touch-down on `id` at a parent-space point.
    pub fn on_touch_begin(&mut self, id: &K, point: Point) -> Vec<StageEvent<K>> {
        self.dispatch(id, |interp, item| interp.touch_begin(item, point))
    }

    /// Touch on `id` moved to a parent-space point.
    pub fn on_touch_move(&mut self, id: &K, point: Point) -> Vec<StageEvent<K>> {
        self.dispatch(id, |interp, item| interp.touch_move(item, point))
    }

    /// Touch on `id` lifted.
    pub fn on_touch_end(&mut self, id: &K) -> Vec<StageEvent<K>> {
        self.dispatch(id, |interp, _| interp.touch_end())
    }

    /// Touch on `id` cancelled by the platform.
    pub fn on_touch_cancel(&mut self, id: &K) -> Vec<StageEvent<K>> {
        self.dispatch(id, |interp, _| interp.touch_cancel())
    }

    /// Pinch started over `id`.
    pub fn on_pinch_begin(&mut self, id: &K) -> Vec<StageEvent<K>> {
        self.dispatch(id, |interp, item| {
            interp.pinch_begin(item);
            None
        })
    }

    /// Pinch over `id` reached a cumulative `scale` since it began.
    pub fn on_pinch_change(&mut self, id: &K, scale: f64) -> Vec<StageEvent<K>> {
        self.dispatch(id, |interp, item| interp.pinch_change(item, scale))
    }

    /// Pinch over `id` ended.
    pub fn on_pinch_end(&mut self, id: &K) -> Vec<StageEvent<K>> {
        self.dispatch(id, |interp, _| {
            interp.pinch_end();
            None
        })
    }

    /// Records the user's confirmation that `id` should be deleted.
    ///
    /// The item stays until the next [`Stage::run_deferred`]. Returns `false`
    /// for unknown ids or ids already queued.
    pub fn confirm_delete(&mut self, id: K) -> bool {
        if !self.contains(&id) || self.pending_deletes.contains(&id) {
            return false;
        }
        #[cfg(feature = "log")]
        log::debug!("deletion queued for the next turn");
        self.pending_deletes.push(id);
        true
    }

    /// Returns `true` if deletions are waiting for the next turn.
    #[must_use]
    pub fn has_deferred(&self) -> bool {
        !self.pending_deletes.is_empty()
    }

    /// Runs work deferred to the next turn of the event loop.
    ///
    /// Removes every item whose deletion was confirmed and reports each one
    /// as [`StageEvent::DeleteRequested`], in confirmation order.
    pub fn run_deferred(&mut self) -> Vec<StageEvent<K>> {
        let pending = core::mem::take(&mut self.pending_deletes);
        let mut events = Vec::with_capacity(pending.len());
        for id in pending {
            if let Some(index) = self.entries.iter().position(|e| e.id == id) {
                self.entries.remove(index);
                #[cfg(feature = "log")]
                log::debug!("removed item at index {index}");
                events.push(StageEvent::DeleteRequested(id));
            }
        }
        events
    }

    fn entry(&self, id: &K) -> Option<&Entry<K>> {
        self.entries.iter().find(|e| &e.id == id)
    }

    fn dispatch(
        &mut self,
        id: &K,
        f: impl FnOnce(&mut GestureInterpreter, &TransformableItem) -> Option<Command>,
    ) -> Vec<StageEvent<K>> {
        let mut events = Vec::new();
        let Some(entry) = self.entries.iter_mut().find(|e| &e.id == id) else {
            #[cfg(feature = "log")]
            log::trace!("dropping event for an unknown item");
            return events;
        };

        let before = (
            entry.interpreter.visibility(),
            entry.interpreter.is_editing(),
        );
        let command = f(&mut entry.interpreter, &entry.item);
        let moved = command.is_some_and(|c| c.apply(&mut entry.item));
        let after = (
            entry.interpreter.visibility(),
            entry.interpreter.is_editing(),
        );

        if command == Some(Command::RequestDelete) {
            events.push(StageEvent::ConfirmDelete(entry.id.clone()));
        }
        if moved || before != after {
            events.push(StageEvent::Render(entry.frame()));
        }
        events
    }
}
