// Copyright 2025 the Handlebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch scripts and their playback through a [`Stage`].

use handlebox_gesture::{EngineConfig, RenderFrame, Stage, StageEvent};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::error::DemoError;

/// An item placed on the stage before playback.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct ItemSpec {
    pub(crate) id: u32,
    /// `[x, y, width, height]` in parent space.
    pub(crate) frame: [f64; 4],
}

impl ItemSpec {
    fn rect(&self) -> Rect {
        let [x, y, w, h] = self.frame;
        Rect::new(x, y, x + w, y + h)
    }
}

/// One platform callback, or the event loop turning over.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ScriptEvent {
    TouchBegin { id: u32, x: f64, y: f64 },
    TouchMove { id: u32, x: f64, y: f64 },
    TouchEnd { id: u32 },
    TouchCancel { id: u32 },
    PinchBegin { id: u32 },
    PinchChange { id: u32, scale: f64 },
    PinchEnd { id: u32 },
    ConfirmDelete { id: u32 },
    NextTurn,
}

impl ScriptEvent {
    fn target(&self) -> Option<u32> {
        match *self {
            Self::TouchBegin { id, .. }
            | Self::TouchMove { id, .. }
            | Self::TouchEnd { id }
            | Self::TouchCancel { id }
            | Self::PinchBegin { id }
            | Self::PinchChange { id, .. }
            | Self::PinchEnd { id }
            | Self::ConfirmDelete { id } => Some(id),
            Self::NextTurn => None,
        }
    }
}

/// Items to place and events to replay.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Script {
    #[serde(default)]
    pub(crate) items: Vec<ItemSpec>,
    #[serde(default)]
    pub(crate) events: Vec<ScriptEvent>,
}

impl Script {
    /// A single item taken through every gesture the engine knows.
    ///
    /// Coordinates follow the default configuration: the drag leaves the item
    /// at 150×400 centered on (75, 200), and the quarter turn plus 1.2× pinch
    /// put the delete handle at (39, 338).
    pub(crate) fn builtin() -> Self {
        use ScriptEvent::*;

        let id = 1;
        Self {
            items: vec![ItemSpec {
                id,
                frame: [0.0, 0.0, 120.0, 320.0],
            }],
            events: vec![
                // Tap to reveal the handles.
                TouchBegin { id, x: 60.0, y: 160.0 },
                TouchEnd { id },
                // Drag the bottom-right corner out by 30pt.
                TouchBegin { id, x: 120.0, y: 320.0 },
                TouchMove { id, x: 135.0, y: 320.0 },
                TouchMove { id, x: 150.0, y: 320.0 },
                TouchEnd { id },
                // Sweep the rotate handle a quarter turn around the center.
                TouchBegin { id, x: 190.0, y: 170.0 },
                TouchMove { id, x: 105.0, y: 315.0 },
                TouchEnd { id },
                // Pinch: the first step falls below the floor and is dropped.
                PinchBegin { id },
                PinchChange { id, scale: 0.5 },
                PinchChange { id, scale: 1.2 },
                PinchEnd { id },
                // Tap delete, confirm, and let the loop turn over.
                TouchBegin { id, x: 39.0, y: 338.0 },
                TouchEnd { id },
                ConfirmDelete { id },
                NextTurn,
            ],
        }
    }
}

/// Places the script's items on a fresh stage.
pub(crate) fn build_stage(
    config: EngineConfig,
    items: &[ItemSpec],
) -> Result<Stage<u32>, DemoError> {
    let mut stage = Stage::new(config);
    for spec in items {
        if !stage.insert(spec.id, spec.rect()) {
            return Err(DemoError::DuplicateItem(spec.id));
        }
    }
    Ok(stage)
}

/// Feeds one script event to `stage`.
///
/// `index` is only used to report which event named an unknown item.
pub(crate) fn step(
    stage: &mut Stage<u32>,
    index: usize,
    event: ScriptEvent,
) -> Result<Vec<StageEvent<u32>>, DemoError> {
    if let Some(id) = event.target()
        && !stage.contains(&id)
    {
        return Err(DemoError::UnknownItem { index, id });
    }
    log::debug!("event {index}: {event:?}");

    let events = match event {
        ScriptEvent::TouchBegin { id, x, y } => stage.on_touch_begin(&id, Point::new(x, y)),
        ScriptEvent::TouchMove { id, x, y } => stage.on_touch_move(&id, Point::new(x, y)),
        ScriptEvent::TouchEnd { id } => stage.on_touch_end(&id),
        ScriptEvent::TouchCancel { id } => stage.on_touch_cancel(&id),
        ScriptEvent::PinchBegin { id } => stage.on_pinch_begin(&id),
        ScriptEvent::PinchChange { id, scale } => stage.on_pinch_change(&id, scale),
        ScriptEvent::PinchEnd { id } => stage.on_pinch_end(&id),
        ScriptEvent::ConfirmDelete { id } => {
            if !stage.confirm_delete(id) {
                log::warn!("deletion of item {id} was already confirmed");
            }
            Vec::new()
        }
        ScriptEvent::NextTurn => stage.run_deferred(),
    };
    Ok(events)
}

/// Replays `script`, handing every stage event to `sink`.
///
/// Returns the stage as it stands after the last event.
pub(crate) fn play(
    config: EngineConfig,
    script: &Script,
    mut sink: impl FnMut(&StageEvent<u32>),
) -> Result<Stage<u32>, DemoError> {
    let mut stage = build_stage(config, &script.items)?;
    for (index, &event) in script.events.iter().enumerate() {
        for out in step(&mut stage, index, event)? {
            sink(&out);
        }
    }
    if stage.has_deferred() {
        log::info!("script ended with deletions still pending");
    }
    Ok(stage)
}

/// One line of human-readable output for a stage event.
pub(crate) fn describe(event: &StageEvent<u32>) -> String {
    match event {
        StageEvent::Render(frame) => describe_frame(frame),
        StageEvent::ConfirmDelete(id) => format!("#{id} confirm delete?"),
        StageEvent::DeleteRequested(id) => format!("#{id} deleted"),
    }
}

fn describe_frame(frame: &RenderFrame<u32>) -> String {
    let [a, b, ..] = frame.transform.as_coeffs();
    let center = frame.transform * frame.base_frame.center();
    let size = frame.base_frame.size();
    format!(
        "#{} render size={:.1}x{:.1} center=({:.1}, {:.1}) rotation={:.1}° scale={:.2} editing={} border={} handles={:?}",
        frame.id,
        size.width,
        size.height,
        center.x,
        center.y,
        b.atan2(a).to_degrees(),
        frame.transform.determinant().abs().sqrt(),
        frame.editing,
        frame.border,
        frame.handles.visibility(),
    )
}
