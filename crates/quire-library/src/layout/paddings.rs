use serde::{Deserialize, Serialize};

use super::Length;

/// The space between a frame's border and its content.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Paddings {
    pub left: Length,
    pub right: Length,
    pub top: Length,
    pub bottom: Length,
}

impl Paddings {
    /// Create paddings from the four sides.
    pub const fn new(left: Length, right: Length, top: Length, bottom: Length) -> Self {
        Self { left, right, top, bottom }
    }

    /// No padding on any side.
    pub const fn zero() -> Self {
        Self::splat(Length::zero())
    }

    /// The same padding on all four sides.
    pub const fn splat(value: Length) -> Self {
        Self { left: value, right: value, top: value, bottom: value }
    }

    /// The sum of the left and right padding.
    pub fn horizontal(&self) -> Length {
        self.left + self.right
    }

    /// The sum of the top and bottom padding.
    pub fn vertical(&self) -> Length {
        self.top + self.bottom
    }
}
