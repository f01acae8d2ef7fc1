use ecow::EcoString;

use crate::layout::Length;
use crate::text::{FontResolver, MathConstants, TypesetContext};
use crate::visualize::Color;

/// How deeply nested in scripts math is set.
///
/// See the TeXbook p. 141.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum MathLevel {
    /// Math that is not in a script.
    #[default]
    Base,
    /// Sub- and superscripts.
    Script,
    /// Second-level sub- and superscripts and everything deeper.
    ScriptScript,
}

impl MathLevel {
    /// The level one script deeper, saturating at the deepest level.
    pub fn advance(self) -> Self {
        match self {
            Self::Base => Self::Script,
            Self::Script | Self::ScriptScript => Self::ScriptScript,
        }
    }
}

/// The state math is laid out in.
///
/// Contexts are never mutated. Entering a script derives a new context; the
/// caller resumes the outer level by keeping the original.
#[derive(Debug, Clone, PartialEq)]
pub struct MathContext {
    font: EcoString,
    size: Length,
    color: Color,
    depth: u32,
    level: MathLevel,
}

impl MathContext {
    /// A fresh context at base level.
    pub fn new(font: impl Into<EcoString>, size: Length, color: Color) -> Self {
        Self {
            font: font.into(),
            size,
            color,
            depth: 0,
            level: MathLevel::Base,
        }
    }

    /// A fresh context for math set in the given typesetting context.
    pub fn from_context(ctx: &TypesetContext) -> Self {
        Self::new(ctx.math_font.clone(), ctx.font_size, ctx.text_color)
    }

    /// The abbreviation of the math font.
    pub fn font(&self) -> &EcoString {
        &self.font
    }

    /// The font size at base level.
    pub fn base_size(&self) -> Length {
        self.size
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// How many scripts deep this context is.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn level(&self) -> MathLevel {
        self.level
    }

    /// Whether no script has been entered.
    pub fn is_in_base_level(&self) -> bool {
        self.depth == 0
    }

    /// The context for a script attached to content in this context.
    pub fn enter_script(&self) -> Self {
        Self {
            depth: self.depth + 1,
            level: self.level.advance(),
            ..self.clone()
        }
    }

    /// The same context in a different color.
    pub fn with_color(&self, color: Color) -> Self {
        Self { color, ..self.clone() }
    }

    /// The math constants of the context's font.
    ///
    /// A font without math constants falls back to the defaults.
    pub fn constants(&self, fonts: &dyn FontResolver) -> MathConstants {
        fonts.math_constants(&self.font).unwrap_or_else(|| {
            log::debug!("font {} has no math constants, using defaults", self.font);
            MathConstants::default()
        })
    }

    /// The font size at the current level.
    pub fn actual_font_size(&self, fonts: &dyn FontResolver) -> Length {
        match self.level {
            MathLevel::Base => self.size,
            MathLevel::Script => self.size * self.constants(fonts).script_scale_down,
            MathLevel::ScriptScript => {
                self.size * self.constants(fonts).script_script_scale_down
            }
        }
    }

    /// Rendering parameters for glyphs at the current level.
    pub fn string_info(&self, fonts: &dyn FontResolver) -> MathStringInfo {
        MathStringInfo {
            font: self.font.clone(),
            size: self.actual_font_size(fonts),
            color: self.color,
        }
    }
}

/// Everything needed to render a math glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct MathStringInfo {
    /// The math font's abbreviation.
    pub font: EcoString,
    /// The absolute font size.
    pub size: Length,
    pub color: Color,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::testing::StubFonts;

    fn context() -> MathContext {
        MathContext::new("math", Length::pt(10.0), Color::BLACK)
    }

    #[test]
    fn test_level_saturates() {
        let base = context();
        let script = base.enter_script();
        let script_script = script.enter_script();
        let deeper = script_script.enter_script();

        assert_eq!(base.level(), MathLevel::Base);
        assert_eq!(script.level(), MathLevel::Script);
        assert_eq!(script_script.level(), MathLevel::ScriptScript);
        assert_eq!(deeper.level(), MathLevel::ScriptScript);
        assert_eq!(deeper.depth(), 3);

        assert!(base.is_in_base_level());
        for ctx in [&script, &script_script, &deeper] {
            assert!(!ctx.is_in_base_level());
        }
    }

    #[test]
    fn test_entering_leaves_parent_untouched() {
        let base = context();
        let _ = base.enter_script();
        assert_eq!(base.depth(), 0);
        assert_eq!(base.level(), MathLevel::Base);
    }

    #[test]
    fn test_actual_font_size() {
        let fonts = StubFonts::default();
        let base = context();
        assert_eq!(base.actual_font_size(&fonts), Length::pt(10.0));
        assert_eq!(base.enter_script().actual_font_size(&fonts), Length::pt(7.0));
        let ss = base.enter_script().enter_script();
        assert_eq!(ss.actual_font_size(&fonts), Length::pt(5.0));
        assert_eq!(ss.enter_script().actual_font_size(&fonts), Length::pt(5.0));
    }

    #[test]
    fn test_unknown_math_font_uses_defaults() {
        let fonts = StubFonts::new(&[]);
        let script = context().enter_script();
        assert_eq!(script.constants(&fonts), MathConstants::default());
        assert_eq!(script.actual_font_size(&fonts), Length::pt(7.0));
    }

    #[test]
    fn test_from_context() {
        let mut ctx = TypesetContext::default();
        ctx.math_font = "math".into();
        ctx.font_size = Length::pt(12.0);
        let math = MathContext::from_context(&ctx);
        assert_eq!(math.font().as_str(), "math");
        assert_eq!(math.base_size(), Length::pt(12.0));
        assert_eq!(math.string_info(&StubFonts::default()).size, Length::pt(12.0));
    }
}
