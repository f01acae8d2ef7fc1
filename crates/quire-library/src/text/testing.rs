//! A font resolver with synthetic metrics for tests.

use ecow::EcoVec;

use super::{FontResolver, Glyph, GlyphId, MathConstants, MathGlyph, ShapedText, StringInfo};
use crate::layout::Length;

/// Resolves a fixed set of font names with simple metrics: every glyph is
/// half an em wide, 0.7em high and 0.2em deep.
#[derive(Debug, Clone)]
pub struct StubFonts {
    known: Vec<&'static str>,
}

impl StubFonts {
    /// Glyph advance relative to the font size.
    pub const ADVANCE: f64 = 0.5;
    /// Glyph height relative to the font size.
    pub const HEIGHT: f64 = 0.7;
    /// Glyph depth relative to the font size.
    pub const DEPTH: f64 = 0.2;

    /// A resolver that knows exactly the given fonts.
    pub fn new(known: &[&'static str]) -> Self {
        Self { known: known.to_vec() }
    }

    fn knows(&self, font: &str) -> bool {
        self.known.iter().any(|known| *known == font)
    }
}

impl Default for StubFonts {
    fn default() -> Self {
        Self::new(&["serif", "math", "fallback"])
    }
}

impl FontResolver for StubFonts {
    fn shape(&self, info: &StringInfo, text: &str) -> Option<ShapedText> {
        if !self.knows(&info.font) {
            return None;
        }
        let advance = info.size * Self::ADVANCE;
        let glyphs: EcoVec<Glyph> = text
            .chars()
            .map(|c| Glyph { id: GlyphId(c as u32 as u16), advance })
            .collect();
        Some(ShapedText {
            width: advance * glyphs.len() as f64,
            height: info.size * Self::HEIGHT,
            depth: info.size * Self::DEPTH,
            glyphs,
        })
    }

    fn math_constants(&self, font: &str) -> Option<MathConstants> {
        self.knows(font).then(MathConstants::default)
    }

    fn math_glyph(&self, font: &str, size: Length, c: char) -> Option<MathGlyph> {
        if !self.knows(font) || c.is_control() {
            return None;
        }
        Some(MathGlyph {
            id: GlyphId(c as u32 as u16),
            width: size * Self::ADVANCE,
            height: size * Self::HEIGHT,
            depth: size * Self::DEPTH,
            italic_correction: Length::zero(),
        })
    }
}
