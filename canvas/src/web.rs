//! Browser binding: a canvas-backed [`Surface`] and DOM event adapters.
//!
//! [`WebShell`] wraps an [`Apper`] over a [`CanvasSurface`]. The host wires
//! DOM listeners to the `on_*` methods; each converts the DOM event into the
//! shell's raw records, dispatches it, and calls `preventDefault` /
//! `stopPropagation` when the outcome asks for it.
//!
//! Timestamps come from the host (`performance.now()` in milliseconds).

use std::time::Duration;

use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent, TouchList,
    WheelEvent,
};

use crate::app::{Apper, ShellConfig};
use crate::dispatch::{Dispatch, Handlers};
use crate::error::{ShellError, SurfaceError};
use crate::input::{InputTarget, PointerDevice, RawKey, RawModifiers, RawPointer, RawWheel};
use crate::message::{MessageEvent, MessageId};
use crate::render::Surface;
use crate::vector::Vector2;
use crate::viewport::Affine;

fn js_error(value: JsValue) -> SurfaceError {
    SurfaceError::new(format!("{value:?}"))
}

// =============================================================
// CanvasSurface
// =============================================================

/// `<canvas>` element with its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// # Errors
    ///
    /// Fails when the canvas cannot provide a 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or_else(|| SurfaceError::new("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::new("context is not a CanvasRenderingContext2d"))?;
        Ok(Self { canvas, ctx })
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Context for the application's render callback.
    #[must_use]
    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }
}

impl Surface for CanvasSurface {
    fn reset_transform(&mut self) -> Result<(), SurfaceError> {
        self.ctx.reset_transform().map_err(js_error)
    }

    fn clear(&mut self, width: f64, height: f64) -> Result<(), SurfaceError> {
        self.ctx.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn set_transform(&mut self, m: &Affine) -> Result<(), SurfaceError> {
        self.ctx.set_transform(m.a, m.b, m.c, m.d, m.e, m.f).map_err(js_error)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        Ok(())
    }

    /// Focus failures are logged and otherwise ignored; a missing focus only
    /// costs keyboard input until the next click.
    fn focus(&mut self) -> Result<(), SurfaceError> {
        if let Err(err) = self.canvas.focus() {
            warn!(error = ?err, "canvas focus failed");
        }
        Ok(())
    }
}

// =============================================================
// WebShell
// =============================================================

/// [`Apper`] bound to a browser canvas.
pub struct WebShell<H> {
    app: Apper<H, CanvasSurface>,
}

impl<H: Handlers<CanvasSurface>> WebShell<H> {
    /// # Errors
    ///
    /// Fails when the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, handlers: H, config: &ShellConfig) -> Result<Self, ShellError> {
        let surface = CanvasSurface::new(canvas)?;
        Ok(Self { app: Apper::new(handlers, surface, config) })
    }

    #[must_use]
    pub fn app(&self) -> &Apper<H, CanvasSurface> {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut Apper<H, CanvasSurface> {
        &mut self.app
    }

    // --- Layout ---

    /// # Errors
    ///
    /// See [`Apper::start`].
    pub fn start(&mut self, width: f64, height: f64, pixel_scale: f64) -> Result<(), ShellError> {
        self.app.start(width, height, pixel_scale)
    }

    /// Host element resized; sizes are CSS pixels, `pixel_scale` is
    /// `window.devicePixelRatio`.
    ///
    /// # Errors
    ///
    /// See [`Apper::window_resize`].
    pub fn on_resize(&mut self, width: f64, height: f64, pixel_scale: f64) -> Result<(), ShellError> {
        self.app.window_resize(width, height, pixel_scale)
    }

    /// Page offset of the host element (`offsetLeft`, `offsetTop`).
    ///
    /// # Errors
    ///
    /// Non-finite offsets.
    pub fn set_origin(&mut self, left: f64, top: f64) -> Result<(), ShellError> {
        self.app.set_origin(Vector2::new(left, top))
    }

    // --- Mouse ---

    /// # Errors
    ///
    /// Malformed event or surface failure.
    pub fn on_mouse_down(&mut self, event: &MouseEvent) -> Result<Dispatch, ShellError> {
        let raw = self.mouse(event);
        let outcome = self.app.pointer_down(&raw)?;
        Ok(apply(event, outcome))
    }

    /// # Errors
    ///
    /// Malformed event or surface failure.
    pub fn on_mouse_move(&mut self, event: &MouseEvent) -> Result<Dispatch, ShellError> {
        let raw = self.mouse(event);
        self.app.pointer_move(&raw)
    }

    /// # Errors
    ///
    /// Malformed event or surface failure.
    pub fn on_mouse_up(&mut self, event: &MouseEvent) -> Result<Dispatch, ShellError> {
        let raw = self.mouse(event);
        self.app.pointer_up(&raw)
    }

    /// # Errors
    ///
    /// Malformed event or surface failure.
    pub fn on_context_menu(&mut self, event: &MouseEvent) -> Result<Dispatch, ShellError> {
        let raw = self.mouse(event);
        let outcome = self.app.context_menu(&raw)?;
        Ok(apply(event, outcome))
    }

    // --- Touch ---

    /// # Errors
    ///
    /// A touch start without contacts, or surface failure.
    pub fn on_touch_start(&mut self, event: &TouchEvent) -> Result<Dispatch, ShellError> {
        let raw = self.touch(event);
        let outcome = self.app.pointer_down(&raw)?;
        Ok(apply(event, outcome))
    }

    /// # Errors
    ///
    /// A touch move without contacts, or surface failure.
    pub fn on_touch_move(&mut self, event: &TouchEvent) -> Result<Dispatch, ShellError> {
        let raw = self.touch(event);
        self.app.pointer_move(&raw)
    }

    /// # Errors
    ///
    /// Surface failure.
    pub fn on_touch_end(&mut self, event: &TouchEvent) -> Result<Dispatch, ShellError> {
        let raw = self.touch(event);
        self.app.pointer_up(&raw)
    }

    // --- Wheel ---

    /// # Errors
    ///
    /// Malformed event or surface failure.
    pub fn on_wheel(&mut self, event: &WheelEvent) -> Result<Dispatch, ShellError> {
        let raw = RawWheel {
            page: Vector2::new(f64::from(event.page_x()), f64::from(event.page_y())),
            delta_x: event.delta_x(),
            delta_y: event.delta_y(),
            modifiers: RawModifiers::reported(event.alt_key(), event.ctrl_key(), event.meta_key(), event.shift_key()),
            target: self.target(event.target()),
        };
        let outcome = self.app.scroll_wheel(&raw)?;
        Ok(apply(event, outcome))
    }

    // --- Keyboard ---

    /// # Errors
    ///
    /// Surface failure.
    pub fn on_key_down(&mut self, event: &KeyboardEvent) -> Result<Dispatch, ShellError> {
        let raw = self.key(event);
        let outcome = self.app.key_down(&raw)?;
        Ok(apply(event, outcome))
    }

    /// # Errors
    ///
    /// Surface failure.
    pub fn on_key_up(&mut self, event: &KeyboardEvent) -> Result<Dispatch, ShellError> {
        let raw = self.key(event);
        self.app.key_up(&raw)
    }

    // --- Messages ---

    pub fn show_message(&mut self, text: &str, now_ms: f64) -> MessageId {
        self.app.show_message(text, millis(now_ms))
    }

    pub fn show_error(&mut self, text: &str, now_ms: f64) -> MessageId {
        self.app.show_error(text, millis(now_ms))
    }

    pub fn hide_message(&mut self, now_ms: f64) -> Option<MessageId> {
        self.app.hide_message(millis(now_ms))
    }

    /// `animationend` fired on the message element for `id`.
    pub fn on_message_animation_end(&mut self, id: MessageId) -> bool {
        self.app.message_animation_finished(id)
    }

    pub fn tick(&mut self, now_ms: f64) -> Vec<MessageEvent> {
        self.app.tick(millis(now_ms))
    }

    // --- Conversion ---

    fn target(&self, target: Option<EventTarget>) -> InputTarget {
        let canvas: &JsValue = self.app.surface().canvas().as_ref();
        match target {
            Some(t) if AsRef::<JsValue>::as_ref(&t) == canvas => InputTarget::Surface,
            _ => InputTarget::Elsewhere,
        }
    }

    fn mouse(&self, event: &MouseEvent) -> RawPointer {
        RawPointer {
            device: PointerDevice::Mouse {
                page: Vector2::new(f64::from(event.page_x()), f64::from(event.page_y())),
                buttons: event.buttons(),
                button: event.button(),
            },
            modifiers: RawModifiers::reported(event.alt_key(), event.ctrl_key(), event.meta_key(), event.shift_key()),
            target: self.target(event.target()),
        }
    }

    fn touch(&self, event: &TouchEvent) -> RawPointer {
        RawPointer {
            device: PointerDevice::Touch { touches: touch_points(&event.touches()) },
            modifiers: RawModifiers::reported(event.alt_key(), event.ctrl_key(), event.meta_key(), event.shift_key()),
            target: self.target(event.target()),
        }
    }

    fn key(&self, event: &KeyboardEvent) -> RawKey {
        RawKey {
            code: event.code(),
            modifiers: RawModifiers::reported(event.alt_key(), event.ctrl_key(), event.meta_key(), event.shift_key()),
            target: self.target(event.target()),
        }
    }
}

fn touch_points(list: &TouchList) -> Vec<Vector2> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| Vector2::new(f64::from(t.page_x()), f64::from(t.page_y())))
        .collect()
}

fn millis(ms: f64) -> Duration {
    Duration::try_from_secs_f64(ms.max(0.0) / 1000.0).unwrap_or_default()
}

fn apply(event: &Event, outcome: Dispatch) -> Dispatch {
    if outcome.prevent_default {
        event.prevent_default();
        event.stop_propagation();
    }
    outcome
}
