//! Input model: raw host events, sticky modifier state, and normalized records.
//!
//! Hosts translate native events into the `Raw*` records below; those carry
//! exactly what the platform reported, with `None` for anything it did not.
//! The dispatcher folds them into the persistent [`ModifierState`] and emits
//! one `*Info` record per event for the handler set. Info records are
//! ephemeral: they exist for the duration of a handler call.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::consts::{BUTTON_MASK_LEFT, BUTTON_MASK_MIDDLE, BUTTON_MASK_RIGHT, TOUCH_BUTTON};
use crate::vector::Vector2;

// =============================================================
// Raw events
// =============================================================

/// Modifier flags as reported by a single host event.
///
/// `None` means the event did not carry that flag (synthetic or partial events).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawModifiers {
    pub alt: Option<bool>,
    pub ctrl: Option<bool>,
    pub meta: Option<bool>,
    pub shift: Option<bool>,
}

impl RawModifiers {
    /// All four flags reported, as DOM events do.
    #[must_use]
    pub fn reported(alt: bool, ctrl: bool, meta: bool, shift: bool) -> Self {
        Self { alt: Some(alt), ctrl: Some(ctrl), meta: Some(meta), shift: Some(shift) }
    }
}

/// Where a host event was aimed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputTarget {
    /// The focusable drawing surface.
    #[default]
    Surface,
    /// Anything else: title field, menus, the rest of the page.
    Elsewhere,
}

/// The device behind a pointer event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerDevice {
    /// Mouse with a live `buttons` bitmask and the `button` that changed.
    Mouse {
        /// Page-relative position in logical pixels.
        page: Vector2,
        #[serde(default)]
        buttons: u16,
        #[serde(default)]
        button: i16,
    },
    /// Touch screen. `touches` lists active contacts in page coordinates.
    Touch {
        #[serde(default)]
        touches: Vec<Vector2>,
    },
}

impl PointerDevice {
    #[must_use]
    pub fn is_touch(&self) -> bool {
        matches!(self, Self::Touch { .. })
    }

    /// Page position of the primary contact, if any.
    #[must_use]
    pub fn primary_page_pos(&self) -> Option<Vector2> {
        match self {
            Self::Mouse { page, .. } => Some(*page),
            Self::Touch { touches } => touches.first().copied(),
        }
    }

    /// Held buttons. Touch contacts always count as the primary button.
    #[must_use]
    pub fn buttons(&self) -> Buttons {
        match self {
            Self::Mouse { buttons, .. } => Buttons::from_mask(*buttons),
            Self::Touch { .. } => Buttons { left: true, right: false, middle: false },
        }
    }

    /// The button whose state changed.
    #[must_use]
    pub fn button(&self) -> i16 {
        match self {
            Self::Mouse { button, .. } => *button,
            Self::Touch { .. } => TOUCH_BUTTON,
        }
    }
}

/// Mouse or touch event (down, move, up, context menu).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPointer {
    pub device: PointerDevice,
    #[serde(default)]
    pub modifiers: RawModifiers,
    #[serde(default)]
    pub target: InputTarget,
}

/// Scroll wheel / trackpad event. Deltas are passed through unscaled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawWheel {
    /// Page-relative pointer position in logical pixels.
    pub page: Vector2,
    pub delta_x: f64,
    pub delta_y: f64,
    #[serde(default)]
    pub modifiers: RawModifiers,
    #[serde(default)]
    pub target: InputTarget,
}

/// Keyboard event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawKey {
    /// Physical key code as reported by the host (e.g. `"KeyA"`, `"Enter"`).
    pub code: String,
    #[serde(default)]
    pub modifiers: RawModifiers,
    #[serde(default)]
    pub target: InputTarget,
}

// =============================================================
// Persistent state
// =============================================================

/// Modifier keys as last observed. Flags an event does not report keep their
/// previous value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModifierState {
    pub alt: bool,
    /// Control or the platform meta/command key.
    pub ctrl: bool,
    pub shift: bool,
}

impl ModifierState {
    /// Fold one event's reported flags into the stored state.
    pub fn apply(&mut self, raw: RawModifiers) {
        if let Some(alt) = raw.alt {
            self.alt = alt;
        }
        match (raw.ctrl, raw.meta) {
            (None, None) => {}
            (ctrl, meta) => self.ctrl = ctrl.unwrap_or(false) || meta.unwrap_or(false),
        }
        if let Some(shift) = raw.shift {
            self.shift = shift;
        }
    }
}

/// Primary-contact state machine for the input surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    /// No contact held.
    #[default]
    Idle,
    /// A contact started on the surface and has not been released yet.
    Pressed,
}

// =============================================================
// Normalized records
// =============================================================

/// Which mouse buttons are held.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Buttons {
    pub left: bool,
    pub right: bool,
    pub middle: bool,
}

impl Buttons {
    #[must_use]
    pub fn from_mask(mask: u16) -> Self {
        Self {
            left: mask & BUTTON_MASK_LEFT != 0,
            right: mask & BUTTON_MASK_RIGHT != 0,
            middle: mask & BUTTON_MASK_MIDDLE != 0,
        }
    }
}

/// Normalized pointer event handed to `mouse_down`, `mouse_move`, `mouse_up`
/// and `open_context_menu`.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointerInfo {
    pub is_touch: bool,
    /// Whether the event targeted the input surface.
    pub on_surface: bool,
    /// Device pixels relative to the surface's top-left corner.
    pub screen_pos: Vector2,
    pub world_pos: Vector2,
    pub alt_key: bool,
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub left_btn: bool,
    pub right_btn: bool,
    pub middle_btn: bool,
    /// The button whose state changed (0 for touch).
    pub button: i16,
}

/// Normalized wheel event handed to `scroll_wheel`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WheelInfo {
    pub screen_pos: Vector2,
    pub world_pos: Vector2,
    pub alt_key: bool,
    pub ctrl_key: bool,
    pub shift_key: bool,
    /// Raw horizontal delta, device/browser units.
    pub dx: f64,
    /// Raw vertical delta, device/browser units.
    pub dy: f64,
}

/// Normalized keyboard event handed to `key_down` / `key_up`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyInfo {
    pub alt_key: bool,
    pub ctrl_key: bool,
    pub shift_key: bool,
    /// Lowercased physical key code (`"keya"`, `"enter"`, `"arrowleft"`).
    pub key: String,
}

/// Handed to `window_resize` after the viewport and surface were resized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResizeInfo {
    /// Logical (CSS) pixels.
    pub width: f64,
    /// Logical (CSS) pixels.
    pub height: f64,
}
