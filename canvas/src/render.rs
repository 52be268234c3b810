//! Render pass: prepares the drawing surface and hands it to the application.
//!
//! Every redraw runs the same fixed sequence: reset the transform, clear the
//! whole pixel area, apply the viewport's world-to-screen matrix, then call the
//! application's render callback. The shell owns the sequence; the callback
//! only draws.
//!
//! [`Surface`] is the seam between the shell and the platform. The browser
//! binding implements it over a canvas 2D context; [`RecordingSurface`] keeps
//! a log of calls for headless hosts and tests.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;
use tracing::trace;

use crate::error::SurfaceError;
use crate::viewport::{Affine, Viewport};

/// A drawable, focusable, resizable target.
pub trait Surface {
    /// Return to the identity transform.
    ///
    /// # Errors
    ///
    /// Platform failure.
    fn reset_transform(&mut self) -> Result<(), SurfaceError>;

    /// Clear `width` x `height` device pixels from the origin.
    ///
    /// # Errors
    ///
    /// Platform failure.
    fn clear(&mut self, width: f64, height: f64) -> Result<(), SurfaceError>;

    /// # Errors
    ///
    /// Platform failure.
    fn set_transform(&mut self, matrix: &Affine) -> Result<(), SurfaceError>;

    /// Change the backing store to `width` x `height` device pixels.
    ///
    /// # Errors
    ///
    /// Platform failure.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError>;

    /// Take keyboard focus.
    ///
    /// # Errors
    ///
    /// Platform failure.
    fn focus(&mut self) -> Result<(), SurfaceError>;
}

/// Run one frame: reset, clear, transform, then `render`.
///
/// # Errors
///
/// Stops at the first failing surface call or render error.
pub fn redraw<S, F>(surface: &mut S, viewport: &Viewport, render: F) -> Result<(), SurfaceError>
where
    S: Surface + ?Sized,
    F: FnOnce(&mut S) -> Result<(), SurfaceError>,
{
    let size = viewport.size();
    trace!(width = size.x, height = size.y, zoom = viewport.zoom(), "redraw");
    surface.reset_transform()?;
    surface.clear(size.x, size.y)?;
    surface.set_transform(&viewport.matrix())?;
    render(surface)
}

/// Convert a device-pixel length to a backing-store dimension.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn pixel_dimension(length: f64) -> u32 {
    if length.is_finite() {
        length.round().clamp(0.0, f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

// =============================================================
// RecordingSurface
// =============================================================

/// One call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceOp {
    ResetTransform,
    Clear { width: f64, height: f64 },
    SetTransform { matrix: Affine },
    Resize { width: u32, height: u32 },
    Focus,
}

/// Headless surface that records every call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
    width: u32,
    height: u32,
    focused: bool,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Drain the log, returning what was recorded since the last call.
    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    /// Number of frames started (each frame begins with a transform reset).
    #[must_use]
    pub fn frames(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, SurfaceOp::ResetTransform)).count()
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

impl Surface for RecordingSurface {
    fn reset_transform(&mut self) -> Result<(), SurfaceError> {
        self.ops.push(SurfaceOp::ResetTransform);
        Ok(())
    }

    fn clear(&mut self, width: f64, height: f64) -> Result<(), SurfaceError> {
        self.ops.push(SurfaceOp::Clear { width, height });
        Ok(())
    }

    fn set_transform(&mut self, matrix: &Affine) -> Result<(), SurfaceError> {
        self.ops.push(SurfaceOp::SetTransform { matrix: *matrix });
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), SurfaceError> {
        self.width = width;
        self.height = height;
        self.ops.push(SurfaceOp::Resize { width, height });
        Ok(())
    }

    fn focus(&mut self) -> Result<(), SurfaceError> {
        self.focused = true;
        self.ops.push(SurfaceOp::Focus);
        Ok(())
    }
}
