//! Scripted session replay.
//!
//! A script is a JSON document describing the surface and a timeline of host
//! events. Each event is fed through an [`Apper`] over a [`RecordingSurface`]
//! with the [`Recorder`] handler set, and one JSON line is written per event:
//! the dispatch outcome, the handler calls it caused, message timer
//! transitions and the number of frames drawn. A summary line with the final
//! viewport closes the output.
//!
//! The recorder behaves like a minimal editor: primary drag pans, the wheel
//! zooms around the cursor, `=` / `-` zoom around the center.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use apper_canvas::input::{KeyInfo, PointerInfo, RawKey, RawPointer, RawWheel, ResizeInfo, WheelInfo};
use apper_canvas::message::{MessageEvent, MessageId};
use apper_canvas::render::{RecordingSurface, SurfaceOp};
use apper_canvas::{Apper, Dispatch, Handlers, ShellError, ShellState, Vector2};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::ReplayConfig;

#[derive(Debug, thiserror::Error)]
pub(crate) enum ReplayError {
    #[error("cannot read script {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("output failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("shell error: {0}")]
    Shell(#[from] ShellError),
}

// =============================================================
// Script
// =============================================================

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Script {
    pub viewport: ScriptViewport,
    /// Page offset of the surface, logical pixels.
    #[serde(default)]
    pub origin: Option<Vector2>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub(crate) fn load(path: &Path) -> Result<Self, ReplayError> {
        let text =
            std::fs::read_to_string(path).map_err(|source| ReplayError::Read { path: path.to_path_buf(), source })?;
        Self::parse(&text)
    }

    pub(crate) fn parse(text: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Surface layout in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub(crate) struct ScriptViewport {
    pub width: f64,
    pub height: f64,
    #[serde(default = "unit_scale")]
    pub pixel_scale: f64,
}

fn unit_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ScriptEvent {
    /// Milliseconds since the session started.
    #[serde(default)]
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum Action {
    Down(RawPointer),
    Move(RawPointer),
    Up(RawPointer),
    ContextMenu(RawPointer),
    Wheel(RawWheel),
    KeyDown(RawKey),
    KeyUp(RawKey),
    Resize(ScriptViewport),
    Message { text: String },
    Error { text: String },
    HideMessage,
    /// Only advance the message timers.
    Tick,
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Self::Down(_) => "down",
            Self::Move(_) => "move",
            Self::Up(_) => "up",
            Self::ContextMenu(_) => "context_menu",
            Self::Wheel(_) => "wheel",
            Self::KeyDown(_) => "key_down",
            Self::KeyUp(_) => "key_up",
            Self::Resize(_) => "resize",
            Self::Message { .. } => "message",
            Self::Error { .. } => "error",
            Self::HideMessage => "hide_message",
            Self::Tick => "tick",
        }
    }
}

// =============================================================
// Recorder
// =============================================================

/// Handler invocation as seen by the recorder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "handler", rename_all = "snake_case")]
pub(crate) enum HandlerCall {
    WindowResize { info: ResizeInfo },
    MouseDown { info: PointerInfo, handled: bool },
    MouseMove { info: PointerInfo, handled: bool },
    MouseUp { info: PointerInfo, handled: bool },
    ScrollWheel { info: WheelInfo, handled: bool },
    KeyDown { info: KeyInfo, handled: bool },
    KeyUp { info: KeyInfo, handled: bool },
    OpenContextMenu { info: PointerInfo, handled: bool },
}

/// Handler set for replays: pans, zooms and logs every call.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    zoom_step: f64,
    /// Last screen position of an active primary drag.
    drag: Option<Vector2>,
    calls: Vec<HandlerCall>,
}

impl Recorder {
    pub(crate) fn new(zoom_step: f64) -> Self {
        Self { zoom_step, ..Self::default() }
    }

    pub(crate) fn take_calls(&mut self) -> Vec<HandlerCall> {
        std::mem::take(&mut self.calls)
    }

    fn zoom(&self, state: &mut ShellState, direction: f64, target: Option<Vector2>) -> bool {
        match state.viewport.change_zoom(direction * self.zoom_step, target) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "zoom rejected");
                false
            }
        }
    }
}

impl Handlers<RecordingSurface> for Recorder {
    fn window_resize(&mut self, _state: &mut ShellState, info: &ResizeInfo) {
        self.calls.push(HandlerCall::WindowResize { info: *info });
    }

    fn mouse_down(&mut self, _state: &mut ShellState, info: &PointerInfo) -> bool {
        let handled = info.left_btn;
        if handled {
            self.drag = Some(info.screen_pos);
        }
        self.calls.push(HandlerCall::MouseDown { info: *info, handled });
        handled
    }

    fn mouse_move(&mut self, state: &mut ShellState, info: &PointerInfo) -> bool {
        let handled = match self.drag {
            Some(last) => {
                state.viewport.pan_by(info.screen_pos - last);
                self.drag = Some(info.screen_pos);
                true
            }
            None => false,
        };
        self.calls.push(HandlerCall::MouseMove { info: *info, handled });
        handled
    }

    fn mouse_up(&mut self, _state: &mut ShellState, info: &PointerInfo) -> bool {
        let handled = self.drag.take().is_some();
        self.calls.push(HandlerCall::MouseUp { info: *info, handled });
        handled
    }

    fn scroll_wheel(&mut self, state: &mut ShellState, info: &WheelInfo) -> bool {
        let handled = info.dy != 0.0 && self.zoom(state, -info.dy.signum(), Some(info.screen_pos));
        self.calls.push(HandlerCall::ScrollWheel { info: *info, handled });
        handled
    }

    fn key_down(&mut self, state: &mut ShellState, info: &KeyInfo) -> bool {
        let handled = match info.key.as_str() {
            "equal" | "numpadadd" => self.zoom(state, 1.0, None),
            "minus" | "numpadsubtract" => self.zoom(state, -1.0, None),
            _ => false,
        };
        self.calls.push(HandlerCall::KeyDown { info: info.clone(), handled });
        handled
    }

    fn key_up(&mut self, _state: &mut ShellState, info: &KeyInfo) -> bool {
        self.calls.push(HandlerCall::KeyUp { info: info.clone(), handled: false });
        false
    }

    /// Always claimed so the platform menu stays closed over the surface.
    fn open_context_menu(&mut self, _state: &mut ShellState, info: &PointerInfo) -> bool {
        self.calls.push(HandlerCall::OpenContextMenu { info: *info, handled: true });
        true
    }
}

// =============================================================
// Output
// =============================================================

/// One output line per script event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct StepRecord {
    pub at_ms: u64,
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatch: Option<Dispatch>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub calls: Vec<HandlerCall>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<MessageEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shown: Option<MessageId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<MessageId>,
    pub frames: usize,
}

impl StepRecord {
    fn new(at_ms: u64, event: &'static str) -> Self {
        Self {
            at_ms,
            event,
            dispatch: None,
            calls: Vec::new(),
            messages: Vec::new(),
            shown: None,
            hidden: None,
            frames: 0,
        }
    }
}

/// Final state after the last event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Summary {
    pub events: usize,
    pub frames: usize,
    pub center: Vector2,
    pub zoom: f64,
    pub size: Vector2,
    pub pixel_scale: f64,
    pub cursor: Option<Vector2>,
    pub message: Option<String>,
}

impl Summary {
    fn of(app: &Apper<Recorder, RecordingSurface>, events: usize, frames: usize) -> Self {
        let state = app.state();
        Self {
            events,
            frames,
            center: state.viewport.center(),
            zoom: state.viewport.zoom(),
            size: state.viewport.size(),
            pixel_scale: state.viewport.pixel_scale(),
            cursor: state.cursor_pos(),
            message: state.messages.current().map(|m| m.text.clone()),
        }
    }
}

#[derive(Serialize)]
struct SummaryLine<'a> {
    summary: &'a Summary,
}

fn write_line<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<(), ReplayError> {
    serde_json::to_writer(&mut *out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}

// =============================================================
// Driver
// =============================================================

/// Replay `script`, writing JSON lines to `out`.
pub(crate) async fn run<W: Write>(script: &Script, config: &ReplayConfig, out: &mut W) -> Result<Summary, ReplayError> {
    let mut app = Apper::new(Recorder::new(config.zoom_step), RecordingSurface::new(), &config.shell());
    if let Some(origin) = script.origin {
        app.set_origin(origin)?;
    }

    let layout = script.viewport;
    app.start(layout.width, layout.height, layout.pixel_scale)?;
    let mut opening = StepRecord::new(0, "start");
    collect(&mut app, &mut opening);
    let mut frames = opening.frames;
    write_line(out, &opening)?;

    info!(events = script.events.len(), realtime = config.realtime, "replay started");
    let started = Instant::now();
    for event in &script.events {
        if config.realtime {
            tokio::time::sleep_until(started + Duration::from_millis(event.at_ms)).await;
        }
        let record = step(&mut app, event)?;
        frames += record.frames;
        write_line(out, &record)?;
    }
    out.flush()?;

    let summary = Summary::of(&app, script.events.len(), frames);
    write_line(out, &SummaryLine { summary: &summary })?;
    info!(frames, zoom = summary.zoom, "replay finished");
    Ok(summary)
}

fn step(app: &mut Apper<Recorder, RecordingSurface>, event: &ScriptEvent) -> Result<StepRecord, ReplayError> {
    let now = Duration::from_millis(event.at_ms);
    let mut record = StepRecord::new(event.at_ms, event.action.name());
    record.messages = app.tick(now);

    match &event.action {
        Action::Down(raw) => record.dispatch = Some(app.pointer_down(raw)?),
        Action::Move(raw) => record.dispatch = Some(app.pointer_move(raw)?),
        Action::Up(raw) => record.dispatch = Some(app.pointer_up(raw)?),
        Action::ContextMenu(raw) => record.dispatch = Some(app.context_menu(raw)?),
        Action::Wheel(raw) => record.dispatch = Some(app.scroll_wheel(raw)?),
        Action::KeyDown(raw) => record.dispatch = Some(app.key_down(raw)?),
        Action::KeyUp(raw) => record.dispatch = Some(app.key_up(raw)?),
        Action::Resize(layout) => app.window_resize(layout.width, layout.height, layout.pixel_scale)?,
        Action::Message { text } => record.shown = Some(app.show_message(text.as_str(), now)),
        Action::Error { text } => record.shown = Some(app.show_error(text.as_str(), now)),
        Action::HideMessage => record.hidden = app.hide_message(now),
        Action::Tick => {}
    }

    collect(app, &mut record);
    debug!(at_ms = event.at_ms, event = record.event, frames = record.frames, "replayed");
    Ok(record)
}

fn collect(app: &mut Apper<Recorder, RecordingSurface>, record: &mut StepRecord) {
    record.calls = app.handlers_mut().take_calls();
    record.frames =
        app.surface_mut().take_ops().iter().filter(|op| matches!(op, SurfaceOp::ResetTransform)).count();
}
