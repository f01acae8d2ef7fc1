use ecow::EcoVec;

use super::StringInfo;
use crate::layout::Length;

/// Identifies a glyph within a font.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GlyphId(pub u16);

/// A shaped glyph and how far it advances the pen.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Glyph {
    pub id: GlyphId,
    pub advance: Length,
}

/// A run of text after shaping.
///
/// Produced by the text-shaping stage behind a [`FontResolver`] and stored
/// as is in evaluated string boxes.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ShapedText {
    pub glyphs: EcoVec<Glyph>,
    pub width: Length,
    pub height: Length,
    pub depth: Length,
}

/// Metrics of a single glyph from a math font.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MathGlyph {
    pub id: GlyphId,
    pub width: Length,
    pub height: Length,
    pub depth: Length,
    pub italic_correction: Length,
}

/// Layout constants of a math font, all relative to the font size.
///
/// The defaults approximate the values of Latin Modern Math.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MathConstants {
    /// Scale factor for first-level scripts.
    pub script_scale_down: f64,
    /// Scale factor for second-level scripts.
    pub script_script_scale_down: f64,
    /// Height of the math axis above the baseline.
    pub axis_height: f64,
    pub fraction_rule_thickness: f64,
    pub fraction_numerator_shift_up: f64,
    pub fraction_denominator_shift_down: f64,
    pub fraction_gap_min: f64,
    pub superscript_shift_up: f64,
    pub superscript_bottom_min: f64,
    pub subscript_shift_down: f64,
    pub subscript_top_max: f64,
    pub sub_superscript_gap_min: f64,
    pub radical_vertical_gap: f64,
    pub radical_rule_thickness: f64,
    pub radical_kern_before_degree: f64,
    pub radical_kern_after_degree: f64,
    /// Height of the bottom of the degree as a fraction of the radical's
    /// total extent.
    pub radical_degree_bottom_raise: f64,
    pub upper_limit_gap_min: f64,
    pub lower_limit_gap_min: f64,
}

impl Default for MathConstants {
    fn default() -> Self {
        Self {
            script_scale_down: 0.7,
            script_script_scale_down: 0.5,
            axis_height: 0.25,
            fraction_rule_thickness: 0.04,
            fraction_numerator_shift_up: 0.394,
            fraction_denominator_shift_down: 0.345,
            fraction_gap_min: 0.04,
            superscript_shift_up: 0.363,
            superscript_bottom_min: 0.108,
            subscript_shift_down: 0.247,
            subscript_top_max: 0.344,
            sub_superscript_gap_min: 0.16,
            radical_vertical_gap: 0.05,
            radical_rule_thickness: 0.04,
            radical_kern_before_degree: 0.278,
            radical_kern_after_degree: -0.556,
            radical_degree_bottom_raise: 0.6,
            upper_limit_gap_min: 0.111,
            lower_limit_gap_min: 0.167,
        }
    }
}

/// Access to font data, injected into every operation that needs it.
///
/// Fonts are identified by their abbreviation.
pub trait FontResolver {
    /// Shape a run of text with the font, size and rise in `info`.
    ///
    /// Returns `None` if the font is unknown.
    fn shape(&self, info: &StringInfo, text: &str) -> Option<ShapedText>;

    /// The layout constants of a math font.
    fn math_constants(&self, font: &str) -> Option<MathConstants>;

    /// A glyph of a math font at the given size.
    fn math_glyph(&self, font: &str, size: Length, c: char) -> Option<MathGlyph>;
}
