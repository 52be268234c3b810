//! Axis-aligned rectangle built from a position and a size.
//!
//! All derived values (corners, center, extents) are computed from `position`
//! and `size` on demand, so mutating either immediately changes every accessor.
//! `size` may be negative for rectangles dragged "backwards"; queries that care
//! about orientation normalize first.

#[cfg(test)]
#[path = "rect_test.rs"]
mod rect_test;

use serde::{Deserialize, Serialize};

use crate::vector::Vector2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub position: Vector2,
    pub size: Vector2,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { position: Vector2::new(x, y), size: Vector2::new(w, h) }
    }

    #[must_use]
    pub const fn from_position_size(position: Vector2, size: Vector2) -> Self {
        Self { position, size }
    }

    // --- Components ---

    #[must_use]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    #[must_use]
    pub fn w(&self) -> f64 {
        self.size.x
    }

    #[must_use]
    pub fn h(&self) -> f64 {
        self.size.y
    }

    pub fn set_x(&mut self, x: f64) {
        self.position.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.position.y = y;
    }

    pub fn set_w(&mut self, w: f64) {
        self.size.x = w;
    }

    pub fn set_h(&mut self, h: f64) {
        self.size.y = h;
    }

    // --- Derived extents ---

    #[must_use]
    pub fn cx(&self) -> f64 {
        self.position.x + 0.5 * self.size.x
    }

    #[must_use]
    pub fn cy(&self) -> f64 {
        self.position.y + 0.5 * self.size.y
    }

    /// Right edge (`x + w`).
    #[must_use]
    pub fn xw(&self) -> f64 {
        self.position.x + self.size.x
    }

    /// Bottom edge (`y + h`).
    #[must_use]
    pub fn yh(&self) -> f64 {
        self.position.y + self.size.y
    }

    #[must_use]
    pub fn center(&self) -> Vector2 {
        Vector2::new(self.cx(), self.cy())
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.size.x * self.size.y
    }

    // --- Corners ---

    #[must_use]
    pub fn xy(&self) -> Vector2 {
        self.position
    }

    #[must_use]
    pub fn xwy(&self) -> Vector2 {
        Vector2::new(self.xw(), self.position.y)
    }

    #[must_use]
    pub fn xyh(&self) -> Vector2 {
        Vector2::new(self.position.x, self.yh())
    }

    #[must_use]
    pub fn xwyh(&self) -> Vector2 {
        self.position + self.size
    }

    /// Move the far corner to `corner`, keeping `position` fixed.
    pub fn set_xwyh(&mut self, corner: Vector2) {
        self.size = corner - self.position;
    }

    // --- Queries ---

    /// Equivalent rectangle with non-negative width and height.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let x = if self.size.x < 0.0 { self.position.x + self.size.x } else { self.position.x };
        let y = if self.size.y < 0.0 { self.position.y + self.size.y } else { self.position.y };
        Self::new(x, y, self.size.x.abs(), self.size.y.abs())
    }

    /// Closed containment: points on the boundary are inside.
    #[must_use]
    pub fn contains(&self, point: Vector2) -> bool {
        let r = self.normalized();
        r.x() <= point.x && point.x <= r.xw() && r.y() <= point.y && point.y <= r.yh()
    }

    /// Open overlap test: rectangles that only share an edge do not intersect.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        !(a.xw() <= b.x() || a.x() >= b.xw() || a.yh() <= b.y() || a.y() >= b.yh())
    }

    /// Uniformly scale position and size, e.g. to convert logical to device pixels.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self { position: self.position * factor, size: self.size * factor }
    }
}
