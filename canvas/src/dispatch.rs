//! Input dispatcher: turns raw host events into normalized records.
//!
//! The dispatcher owns the state that must outlive a single event: sticky
//! modifiers, the cursor, the last pointer position and the press phase. It
//! never calls handlers itself. [`crate::app::Apper`] asks it for a record,
//! hands that to the [`Handlers`] set, and maps the handler's answer to a
//! [`Dispatch`] outcome with [`Dispatch::resolve`].
//!
//! Scoping rules:
//!
//! - down, context-menu and wheel events count only when aimed at the surface
//! - move and up count from anywhere, so a drag can leave the surface
//! - keyboard events aimed elsewhere are swallowed without touching modifiers

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;

use serde::Serialize;
use tracing::{debug, trace};

use crate::app::ShellState;
use crate::error::{ShellError, SurfaceError};
use crate::input::{
    InputTarget, KeyInfo, ModifierState, PointerInfo, PointerPhase, RawKey, RawPointer, RawWheel, ResizeInfo,
    WheelInfo,
};
use crate::render::Surface;
use crate::vector::Vector2;
use crate::viewport::Viewport;

// =============================================================
// Handlers
// =============================================================

/// Application callbacks. Every method defaults to "not handled", so an
/// application overrides only what it needs; `()` is the empty set.
///
/// Input methods return `true` when they consumed the event.
pub trait Handlers<S: Surface> {
    /// Draw the scene. Runs on every redraw after the surface was cleared and
    /// the world transform applied.
    ///
    /// # Errors
    ///
    /// Surface failures are propagated to the caller of the redraw.
    fn render(&mut self, _state: &ShellState, _surface: &mut S) -> Result<(), SurfaceError> {
        Ok(())
    }

    /// Called after the viewport and surface took the new size.
    fn window_resize(&mut self, _state: &mut ShellState, _info: &ResizeInfo) {}

    fn mouse_down(&mut self, _state: &mut ShellState, _info: &PointerInfo) -> bool {
        false
    }

    fn mouse_move(&mut self, _state: &mut ShellState, _info: &PointerInfo) -> bool {
        false
    }

    fn mouse_up(&mut self, _state: &mut ShellState, _info: &PointerInfo) -> bool {
        false
    }

    fn scroll_wheel(&mut self, _state: &mut ShellState, _info: &WheelInfo) -> bool {
        false
    }

    fn key_down(&mut self, _state: &mut ShellState, _info: &KeyInfo) -> bool {
        false
    }

    fn key_up(&mut self, _state: &mut ShellState, _info: &KeyInfo) -> bool {
        false
    }

    fn open_context_menu(&mut self, _state: &mut ShellState, _info: &PointerInfo) -> bool {
        false
    }
}

impl<S: Surface> Handlers<S> for () {}

// =============================================================
// Outcome
// =============================================================

/// Event classes with distinct outcome rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventClass {
    Down,
    Move,
    Up,
    Wheel,
    KeyDown,
    KeyUp,
    ContextMenu,
}

/// What the host should do after an event was dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Dispatch {
    /// Suppress the platform's default action (scrolling, browser shortcuts).
    pub prevent_default: bool,
    /// The shell redrew the surface.
    pub redrawn: bool,
}

impl Dispatch {
    /// Nothing happened.
    pub const IGNORED: Self = Self { prevent_default: false, redrawn: false };

    /// Redraw only.
    pub const REDRAW: Self = Self { prevent_default: false, redrawn: true };

    /// Suppress the default action and redraw.
    pub const CONSUMED: Self = Self { prevent_default: true, redrawn: true };

    /// Outcome for an event of `class` whose handler answered `handled`.
    #[must_use]
    pub fn resolve(class: EventClass, handled: bool) -> Self {
        match (class, handled) {
            (EventClass::Down | EventClass::Wheel | EventClass::KeyDown | EventClass::ContextMenu, true) => {
                Self::CONSUMED
            }
            (EventClass::Move | EventClass::Up | EventClass::KeyUp, true)
            | (EventClass::KeyDown | EventClass::KeyUp, false) => Self::REDRAW,
            (_, false) => Self::IGNORED,
        }
    }
}

// =============================================================
// Dispatcher
// =============================================================

/// Persistent input state and the raw-to-normalized conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InputDispatcher {
    modifiers: ModifierState,
    cursor: Option<Vector2>,
    last_screen: Vector2,
    phase: PointerPhase,
    origin: Vector2,
}

impl InputDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Accessors ---

    #[must_use]
    pub fn modifiers(&self) -> ModifierState {
        self.modifiers
    }

    /// Screen position of the pointer while it is over the surface.
    #[must_use]
    pub fn cursor(&self) -> Option<Vector2> {
        self.cursor
    }

    /// Screen position of the most recent pointer event, on or off the surface.
    #[must_use]
    pub fn last_screen(&self) -> Vector2 {
        self.last_screen
    }

    #[must_use]
    pub fn phase(&self) -> PointerPhase {
        self.phase
    }

    /// Page offset of the surface's top-left corner, in logical pixels.
    #[must_use]
    pub fn origin(&self) -> Vector2 {
        self.origin
    }

    /// # Errors
    ///
    /// Returns [`ShellError::NonFiniteVector`] for NaN or infinite components.
    pub fn set_origin(&mut self, origin: Vector2) -> Result<(), ShellError> {
        self.origin = Vector2::try_new(origin.x, origin.y)?;
        Ok(())
    }

    // --- Pointer ---

    /// Accept a press. Returns `None` when the press is aimed off the surface.
    ///
    /// # Errors
    ///
    /// [`ShellError::NoTouchContact`] for a touch start without contacts, or
    /// [`ShellError::NonFiniteVector`] for a non-finite position.
    pub fn pointer_down(&mut self, raw: &RawPointer, viewport: &Viewport) -> Result<Option<PointerInfo>, ShellError> {
        if raw.target != InputTarget::Surface {
            debug!(target = ?raw.target, "pointer down ignored off surface");
            return Ok(None);
        }
        let page = raw.device.primary_page_pos().ok_or(ShellError::NoTouchContact)?;
        let screen = self.page_to_screen(page, viewport)?;
        self.modifiers.apply(raw.modifiers);
        self.track(screen, true);
        self.phase = PointerPhase::Pressed;
        debug!(x = screen.x, y = screen.y, touch = raw.device.is_touch(), "pointer down");
        Ok(Some(self.pointer_info(raw, screen, viewport)))
    }

    /// Accept a move from anywhere; `on_surface` tells the handler where it was.
    ///
    /// # Errors
    ///
    /// Same as [`Self::pointer_down`].
    pub fn pointer_move(&mut self, raw: &RawPointer, viewport: &Viewport) -> Result<PointerInfo, ShellError> {
        let page = raw.device.primary_page_pos().ok_or(ShellError::NoTouchContact)?;
        let screen = self.page_to_screen(page, viewport)?;
        self.modifiers.apply(raw.modifiers);
        self.track(screen, raw.target == InputTarget::Surface);
        trace!(x = screen.x, y = screen.y, phase = ?self.phase, "pointer move");
        Ok(self.pointer_info(raw, screen, viewport))
    }

    /// Accept a release from anywhere. A touch end with no remaining contacts
    /// reports the last known position.
    ///
    /// # Errors
    ///
    /// [`ShellError::NonFiniteVector`] for a non-finite position.
    pub fn pointer_up(&mut self, raw: &RawPointer, viewport: &Viewport) -> Result<PointerInfo, ShellError> {
        let screen = match raw.device.primary_page_pos() {
            Some(page) => {
                let screen = self.page_to_screen(page, viewport)?;
                self.track(screen, raw.target == InputTarget::Surface);
                screen
            }
            None => self.last_screen,
        };
        self.modifiers.apply(raw.modifiers);
        self.phase = PointerPhase::Idle;
        debug!(x = screen.x, y = screen.y, "pointer up");
        Ok(self.pointer_info(raw, screen, viewport))
    }

    /// Accept a context-menu request on the surface.
    ///
    /// # Errors
    ///
    /// Same as [`Self::pointer_down`].
    pub fn context_menu(&mut self, raw: &RawPointer, viewport: &Viewport) -> Result<Option<PointerInfo>, ShellError> {
        if raw.target != InputTarget::Surface {
            return Ok(None);
        }
        let page = raw.device.primary_page_pos().ok_or(ShellError::NoTouchContact)?;
        let screen = self.page_to_screen(page, viewport)?;
        self.modifiers.apply(raw.modifiers);
        self.track(screen, true);
        debug!(x = screen.x, y = screen.y, "context menu");
        Ok(Some(self.pointer_info(raw, screen, viewport)))
    }

    // --- Wheel ---

    /// Accept a wheel event on the surface. Deltas pass through unscaled.
    ///
    /// # Errors
    ///
    /// [`ShellError::NonFiniteVector`] for a non-finite position.
    pub fn wheel(&mut self, raw: &RawWheel, viewport: &Viewport) -> Result<Option<WheelInfo>, ShellError> {
        if raw.target != InputTarget::Surface {
            return Ok(None);
        }
        let screen = self.page_to_screen(raw.page, viewport)?;
        self.modifiers.apply(raw.modifiers);
        self.track(screen, true);
        trace!(dx = raw.delta_x, dy = raw.delta_y, "wheel");
        Ok(Some(WheelInfo {
            screen_pos: screen,
            world_pos: viewport.locate(screen),
            alt_key: self.modifiers.alt,
            ctrl_key: self.modifiers.ctrl,
            shift_key: self.modifiers.shift,
            dx: raw.delta_x,
            dy: raw.delta_y,
        }))
    }

    // --- Keyboard ---

    /// Accept a key event aimed at the surface. Returns `None`, leaving the
    /// modifiers untouched, for events aimed elsewhere.
    pub fn key(&mut self, raw: &RawKey) -> Option<KeyInfo> {
        if raw.target != InputTarget::Surface {
            debug!(code = %raw.code, "key swallowed off surface");
            return None;
        }
        self.modifiers.apply(raw.modifiers);
        Some(KeyInfo {
            alt_key: self.modifiers.alt,
            ctrl_key: self.modifiers.ctrl,
            shift_key: self.modifiers.shift,
            key: raw.code.to_lowercase(),
        })
    }

    // --- Helpers ---

    fn page_to_screen(&self, page: Vector2, viewport: &Viewport) -> Result<Vector2, ShellError> {
        let screen = (page - self.origin) * viewport.pixel_scale();
        Vector2::try_new(screen.x, screen.y)
    }

    fn track(&mut self, screen: Vector2, on_surface: bool) {
        self.last_screen.set(screen);
        self.cursor = on_surface.then_some(screen);
    }

    fn pointer_info(&self, raw: &RawPointer, screen: Vector2, viewport: &Viewport) -> PointerInfo {
        let buttons = raw.device.buttons();
        PointerInfo {
            is_touch: raw.device.is_touch(),
            on_surface: raw.target == InputTarget::Surface,
            screen_pos: screen,
            world_pos: viewport.locate(screen),
            alt_key: self.modifiers.alt,
            ctrl_key: self.modifiers.ctrl,
            shift_key: self.modifiers.shift,
            left_btn: buttons.left,
            right_btn: buttons.right,
            middle_btn: buttons.middle,
            button: raw.device.button(),
        }
    }
}
