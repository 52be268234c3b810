//! Error types for the shell.
//!
//! Every variant of [`ShellError`] is a violated precondition: bad numbers
//! handed in by the host, ids that were never registered, or a failure
//! reported by the drawing surface. Nothing here is retried.

/// Failure reported by a [`crate::render::Surface`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("surface operation failed: {0}")]
pub struct SurfaceError(pub String);

impl SurfaceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Error returned by shell operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShellError {
    /// A vector component was NaN or infinite.
    #[error("non-finite vector ({x}, {y})")]
    NonFiniteVector { x: f64, y: f64 },
    /// Surface sizes must not be negative.
    #[error("negative surface size ({width}, {height})")]
    NegativeSize { width: f64, height: f64 },
    /// Zoom factors must be finite and strictly positive.
    #[error("invalid zoom factor: {0}")]
    InvalidZoom(f64),
    /// `change_zoom` amounts must be finite.
    #[error("invalid zoom amount: {0}")]
    InvalidZoomAmount(f64),
    /// Device pixel ratios must be finite and strictly positive.
    #[error("invalid pixel scale: {0}")]
    InvalidPixelScale(f64),
    /// A touch start or move arrived without any active contact.
    #[error("touch event carries no contact point")]
    NoTouchContact,
    /// The tool id was never registered.
    #[error("unknown tool id {0}")]
    UnknownTool(u32),
    /// The menu/modal id was never created.
    #[error("unknown panel id {0}")]
    UnknownPanel(u32),
    /// The panel exists but is a menu, which has no close button.
    #[error("panel {0} is not a modal")]
    NotModal(u32),
    /// A selector index was outside the available options.
    #[error("option index {index} out of range (len {len})")]
    OptionOutOfRange { index: usize, len: usize },
    /// The drawing surface failed.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
