use std::ops::{Add, Sub};

use super::Length;

/// A point on the page, measured from the origin the backend uses.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Point {
    /// The horizontal coordinate.
    pub x: Length,
    /// The vertical coordinate.
    pub y: Length,
}

impl Point {
    /// The origin point.
    pub const fn zero() -> Self {
        Self { x: Length::zero(), y: Length::zero() }
    }

    /// Create a new point from x and y coordinates.
    pub const fn new(x: Length, y: Length) -> Self {
        Self { x, y }
    }

    /// Create an instance with two equal components.
    pub const fn splat(value: Length) -> Self {
        Self { x: value, y: value }
    }

    /// Create a new point with y set to zero.
    pub const fn with_x(x: Length) -> Self {
        Self { x, y: Length::zero() }
    }

    /// Create a new point with x set to zero.
    pub const fn with_y(y: Length) -> Self {
        Self { x: Length::zero(), y }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self { x: self.x + other.x, y: self.y + other.y }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self { x: self.x - other.x, y: self.y - other.y }
    }
}
