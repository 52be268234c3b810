//! Viewport: the camera mapping world coordinates to screen pixels and back.
//!
//! Screen space is device pixels with the origin at the top-left of the
//! surface. The world point at `center` is drawn at the middle of the surface,
//! and one world unit spans `zoom` screen pixels:
//!
//! ```text
//! screen = (world - center) * zoom + size / 2
//! world  = (screen - size / 2) / zoom + center
//! ```
//!
//! `zoom` and `izoom` are stored as a reciprocal pair so both directions are a
//! multiply. Every setter keeps the pair consistent.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::Serialize;

use crate::error::ShellError;
use crate::rect::Rect;
use crate::vector::Vector2;

/// Row-major 2D affine transform in canvas `setTransform(a, b, c, d, e, f)` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub const IDENTITY: Self = Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    /// Apply the transform to a point.
    #[must_use]
    pub fn apply(&self, p: Vector2) -> Vector2 {
        Vector2::new(self.a * p.x + self.c * p.y + self.e, self.b * p.x + self.d * p.y + self.f)
    }
}

/// Pan/zoom camera for the editing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    center: Vector2,
    size: Vector2,
    zoom: f64,
    izoom: f64,
    pixel_scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { center: Vector2::ZERO, size: Vector2::ZERO, zoom: 1.0, izoom: 1.0, pixel_scale: 1.0 }
    }
}

fn check_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn checked_size(size: Vector2) -> Result<Vector2, ShellError> {
    let size = Vector2::try_new(size.x, size.y)?;
    if size.x < 0.0 || size.y < 0.0 {
        return Err(ShellError::NegativeSize { width: size.x, height: size.y });
    }
    Ok(size)
}

impl Viewport {
    /// Create a viewport of `size` device pixels centered on the world origin,
    /// with one world unit spanning `pixel_scale` device pixels.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is not finite and non-negative or
    /// `pixel_scale` is not positive.
    pub fn new(size: Vector2, pixel_scale: f64) -> Result<Self, ShellError> {
        let mut viewport = Self::default();
        viewport.resize(size, pixel_scale)?;
        Ok(viewport)
    }

    // --- Accessors ---

    /// World point shown at the middle of the surface.
    #[must_use]
    pub fn center(&self) -> Vector2 {
        self.center
    }

    /// # Errors
    ///
    /// Returns [`ShellError::NonFiniteVector`] for NaN or infinite components.
    pub fn set_center(&mut self, center: Vector2) -> Result<(), ShellError> {
        self.center.set(Vector2::try_new(center.x, center.y)?);
        Ok(())
    }

    /// Surface size in device pixels.
    #[must_use]
    pub fn size(&self) -> Vector2 {
        self.size
    }

    /// # Errors
    ///
    /// Returns [`ShellError::NonFiniteVector`] for NaN or infinite components
    /// and [`ShellError::NegativeSize`] for a negative one.
    pub fn set_size(&mut self, size: Vector2) -> Result<(), ShellError> {
        self.size = checked_size(size)?;
        Ok(())
    }

    /// Adopt a new surface size and device pixel ratio together.
    ///
    /// Nothing changes unless both are valid. See [`Self::set_pixel_scale`]
    /// for the effect on zoom.
    ///
    /// # Errors
    ///
    /// Same as [`Self::set_pixel_scale`] and [`Self::set_size`].
    pub fn resize(&mut self, size: Vector2, pixel_scale: f64) -> Result<(), ShellError> {
        let zoom = self.rescaled_zoom(pixel_scale)?;
        let size = checked_size(size)?;
        self.size = size;
        self.pixel_scale = pixel_scale;
        self.zoom = zoom;
        self.izoom = 1.0 / zoom;
        Ok(())
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Inverse zoom (`1 / zoom`).
    #[must_use]
    pub fn izoom(&self) -> f64 {
        self.izoom
    }

    /// # Errors
    ///
    /// Returns [`ShellError::InvalidZoom`] unless `zoom` is finite and positive.
    pub fn set_zoom(&mut self, zoom: f64) -> Result<(), ShellError> {
        let izoom = 1.0 / zoom;
        if !check_positive(zoom) || !check_positive(izoom) {
            return Err(ShellError::InvalidZoom(zoom));
        }
        self.zoom = zoom;
        self.izoom = izoom;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ShellError::InvalidZoom`] unless `izoom` is finite and positive.
    pub fn set_izoom(&mut self, izoom: f64) -> Result<(), ShellError> {
        let zoom = 1.0 / izoom;
        if !check_positive(izoom) || !check_positive(zoom) {
            return Err(ShellError::InvalidZoom(zoom));
        }
        self.zoom = zoom;
        self.izoom = izoom;
        Ok(())
    }

    /// Device pixels per logical (CSS) pixel.
    #[must_use]
    pub fn pixel_scale(&self) -> f64 {
        self.pixel_scale
    }

    /// Change the device pixel ratio. Zoom is multiplied by
    /// `scale / pixel_scale()` around the current center, so a world unit
    /// keeps its logical size when the ratio changes.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::InvalidPixelScale`] unless `scale` is finite and
    /// positive, or [`ShellError::InvalidZoom`] if the rescaled zoom is not.
    pub fn set_pixel_scale(&mut self, scale: f64) -> Result<(), ShellError> {
        let zoom = self.rescaled_zoom(scale)?;
        self.pixel_scale = scale;
        self.zoom = zoom;
        self.izoom = 1.0 / zoom;
        Ok(())
    }

    fn rescaled_zoom(&self, scale: f64) -> Result<f64, ShellError> {
        if !check_positive(scale) {
            return Err(ShellError::InvalidPixelScale(scale));
        }
        let zoom = self.zoom * (scale / self.pixel_scale);
        if !check_positive(zoom) || !check_positive(1.0 / zoom) {
            return Err(ShellError::InvalidZoom(zoom));
        }
        Ok(zoom)
    }

    // --- World -> screen ---

    #[must_use]
    pub fn transform(&self, world: Vector2) -> Vector2 {
        Vector2::new(self.transform_x(world.x), self.transform_y(world.y))
    }

    #[must_use]
    pub fn transform_x(&self, x: f64) -> f64 {
        (x - self.center.x) * self.zoom + 0.5 * self.size.x
    }

    #[must_use]
    pub fn transform_y(&self, y: f64) -> f64 {
        (y - self.center.y) * self.zoom + 0.5 * self.size.y
    }

    /// Convert a world-space length to screen pixels.
    #[must_use]
    pub fn transform_dist(&self, dist: f64) -> f64 {
        dist * self.zoom
    }

    #[must_use]
    pub fn transform_rect(&self, rect: &Rect) -> Rect {
        Rect::from_position_size(self.transform(rect.position), rect.size * self.zoom)
    }

    // --- Screen -> world ---

    #[must_use]
    pub fn locate(&self, screen: Vector2) -> Vector2 {
        Vector2::new(self.locate_x(screen.x), self.locate_y(screen.y))
    }

    #[must_use]
    pub fn locate_x(&self, x: f64) -> f64 {
        (x - 0.5 * self.size.x) * self.izoom + self.center.x
    }

    #[must_use]
    pub fn locate_y(&self, y: f64) -> f64 {
        (y - 0.5 * self.size.y) * self.izoom + self.center.y
    }

    /// Convert a screen-space length (pixels) to world units.
    #[must_use]
    pub fn locate_dist(&self, dist: f64) -> f64 {
        dist * self.izoom
    }

    #[must_use]
    pub fn locate_rect(&self, rect: &Rect) -> Rect {
        Rect::from_position_size(self.locate(rect.position), rect.size * self.izoom)
    }

    /// World-to-screen transform as an affine matrix for the drawing context.
    #[must_use]
    pub fn matrix(&self) -> Affine {
        Affine {
            a: self.zoom,
            b: 0.0,
            c: 0.0,
            d: self.zoom,
            e: 0.5 * self.size.x - self.center.x * self.zoom,
            f: 0.5 * self.size.y - self.center.y * self.zoom,
        }
    }

    // --- Gestures ---

    /// Zoom in (`amount > 0`) or out (`amount < 0`), optionally around `target`.
    ///
    /// Positive amounts multiply the zoom by `1 + amount`; negative amounts
    /// divide it by `1 - amount`, so `change_zoom(a)` followed by
    /// `change_zoom(-a)` restores the original zoom. When `target` (a screen
    /// position) is given, the world point under it stays under it.
    ///
    /// # Errors
    ///
    /// Returns an error for a non-finite amount, a non-finite target, or a
    /// resulting zoom that overflows.
    pub fn change_zoom(&mut self, amount: f64, target: Option<Vector2>) -> Result<(), ShellError> {
        if !amount.is_finite() {
            return Err(ShellError::InvalidZoomAmount(amount));
        }
        if amount == 0.0 {
            return Ok(());
        }
        let target = target.map(|t| Vector2::try_new(t.x, t.y)).transpose()?;
        let old_world = target.map(|t| self.locate(t));

        let zoom = if amount > 0.0 { self.zoom * (1.0 + amount) } else { self.zoom / (1.0 - amount) };
        self.set_zoom(zoom)?;

        // Correction uses the new zoom with the old center; only then move the center.
        if let (Some(t), Some(old)) = (target, old_world) {
            let drift = old - self.locate(t);
            self.center = self.center + drift;
        }
        Ok(())
    }

    /// Scroll the view so content follows a pointer moved by `screen_delta` pixels.
    pub fn pan_by(&mut self, screen_delta: Vector2) {
        self.center = self.center - screen_delta * self.izoom;
    }
}
