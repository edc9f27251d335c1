//! Vector-space abstraction for animatable values
//!
//! Spring physics only needs addition, subtraction, scalar scaling, a zero
//! element, and a squared magnitude. Anything providing those can animate:
//! scalars, 2D points, and in principle colors or transforms.

use std::ops::{Add, Sub};

/// A value living in a real vector space, animatable by a spring.
///
/// Multi-component implementations must keep components independent: the
/// integrator applies the same generic operations to the whole value, so
/// each axis follows the same trajectory it would as a standalone scalar.
pub trait SpringVector: Copy + Send + Add<Output = Self> + Sub<Output = Self> + 'static {
    /// The additive identity.
    fn zero() -> Self;

    /// Scale every component by `factor`.
    fn scale(self, factor: f32) -> Self;

    /// Squared Euclidean magnitude, used for convergence checks.
    fn magnitude_squared(self) -> f32;
}

impl SpringVector for f32 {
    fn zero() -> Self {
        0.0
    }

    fn scale(self, factor: f32) -> Self {
        self * factor
    }

    fn magnitude_squared(self) -> f32 {
        self * self
    }
}

impl SpringVector for f64 {
    fn zero() -> Self {
        0.0
    }

    fn scale(self, factor: f32) -> Self {
        self * factor as f64
    }

    fn magnitude_squared(self) -> f32 {
        (self * self) as f32
    }
}

/// A 2D point with independent x/y components.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SpringVector for Vec2 {
    fn zero() -> Self {
        Vec2::new(0.0, 0.0)
    }

    fn scale(self, factor: f32) -> Self {
        Vec2::new(self.x * factor, self.y * factor)
    }

    fn magnitude_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }
}
