//! Shared constants for the canvas crate.

use std::time::Duration;

// ── Pointer ─────────────────────────────────────────────────────

/// Bit in a mouse `buttons` mask for the primary (left) button.
pub const BUTTON_MASK_LEFT: u16 = 1;

/// Bit in a mouse `buttons` mask for the secondary (right) button.
pub const BUTTON_MASK_RIGHT: u16 = 2;

/// Bit in a mouse `buttons` mask for the auxiliary (middle) button.
pub const BUTTON_MASK_MIDDLE: u16 = 4;

/// `button` value reported for touch contacts (primary).
pub const TOUCH_BUTTON: i16 = 0;

// ── Keyboard ────────────────────────────────────────────────────

/// Key code that commits the title field.
pub const ENTER_KEY: &str = "enter";

// ── Status message ──────────────────────────────────────────────

/// How long a status message stays up, and how long a fading one may linger
/// before it is force-removed.
pub const MESSAGE_DURATION: Duration = Duration::from_secs(10);

// ── Ids ─────────────────────────────────────────────────────────

/// First id handed out by the tool and panel registries. Zero is never a valid id.
pub const FIRST_ID: u32 = 1;
