//! Two-dimensional vector used for both points and offsets.
//!
//! Arithmetic operators accept anything convertible into a [`Vector2`]: another
//! vector, a component pair `(x, y)`, or a single scalar applied to both axes.
//! Multiplication and division by a vector are component-wise.

#[cfg(test)]
#[path = "vector_test.rs"]
mod vector_test;

use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::error::ShellError;

/// A point or offset in either screen or world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both components set to `v`.
    #[must_use]
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }

    /// Build a vector from untrusted numbers, rejecting NaN and infinities.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::NonFiniteVector`] if either component is not finite.
    pub fn try_new(x: f64, y: f64) -> Result<Self, ShellError> {
        let v = Self { x, y };
        if v.is_finite() { Ok(v) } else { Err(ShellError::NonFiniteVector { x, y }) }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Overwrite this vector in place.
    pub fn set(&mut self, v: impl Into<Vector2>) {
        *self = v.into();
    }

    /// Euclidean length.
    #[must_use]
    pub fn magnitude(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[must_use]
    pub fn dot(self, rhs: impl Into<Vector2>) -> f64 {
        let rhs = rhs.into();
        self.x * rhs.x + self.y * rhs.y
    }
}

impl From<f64> for Vector2 {
    fn from(v: f64) -> Self {
        Self::splat(v)
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl<T: Into<Vector2>> Add<T> for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: T) -> Vector2 {
        let rhs = rhs.into();
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Into<Vector2>> Sub<T> for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: T) -> Vector2 {
        let rhs = rhs.into();
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Into<Vector2>> Mul<T> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: T) -> Vector2 {
        let rhs = rhs.into();
        Vector2::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl<T: Into<Vector2>> Div<T> for Vector2 {
    type Output = Vector2;

    fn div(self, rhs: T) -> Vector2 {
        let rhs = rhs.into();
        Vector2::new(self.x / rhs.x, self.y / rhs.y)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}
