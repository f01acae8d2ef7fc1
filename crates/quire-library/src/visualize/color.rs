use std::fmt::{self, Display, Formatter};

use ecow::{EcoString, eco_format};
use serde::{Deserialize, Serialize};

/// A color in one of the device color spaces of the output backend.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "space", content = "components", rename_all = "lowercase")]
pub enum Color {
    /// A gray level between 0 (black) and 1 (white).
    Gray(f64),
    /// Red, green and blue components between 0 and 1.
    Rgb(f64, f64, f64),
    /// Cyan, magenta, yellow and key components between 0 and 1.
    Cmyk(f64, f64, f64, f64),
}

impl Color {
    pub const BLACK: Self = Self::Gray(0.0);
    pub const WHITE: Self = Self::Gray(1.0);

    /// The fill color operation for this color.
    pub fn fill_operation(self) -> Operation {
        Operation::new(match self {
            Self::Gray(g) => eco_format!("{g} g"),
            Self::Rgb(r, g, b) => eco_format!("{r} {g} {b} rg"),
            Self::Cmyk(c, m, y, k) => eco_format!("{c} {m} {y} {k} k"),
        })
    }

    /// The stroke color operation for this color.
    pub fn stroke_operation(self) -> Operation {
        Operation::new(match self {
            Self::Gray(g) => eco_format!("{g} G"),
            Self::Rgb(r, g, b) => eco_format!("{r} {g} {b} RG"),
            Self::Cmyk(c, m, y, k) => eco_format!("{c} {m} {y} {k} K"),
        })
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// An opaque drawing instruction in the output backend's vocabulary.
///
/// The layout model only produces and forwards operations; it never looks
/// inside them.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Operation(EcoString);

impl Operation {
    /// Wrap a backend instruction.
    pub fn new(instruction: impl Into<EcoString>) -> Self {
        Self(instruction.into())
    }

    /// The instruction text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_operations() {
        assert_eq!(Color::BLACK.fill_operation().as_str(), "0 g");
        assert_eq!(Color::Rgb(1.0, 0.5, 0.0).stroke_operation().as_str(), "1 0.5 0 RG");
    }

    #[test]
    fn test_color_from_toml() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            color: Color,
        }
        let parsed: Wrapper =
            toml::from_str("color = { space = \"rgb\", components = [1.0, 0.0, 0.0] }")
                .unwrap();
        assert_eq!(parsed.color, Color::Rgb(1.0, 0.0, 0.0));
    }
}
