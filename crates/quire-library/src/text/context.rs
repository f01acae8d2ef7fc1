use ecow::EcoString;
use serde::{Deserialize, Serialize};
use unicode_script::Script;

use super::FontScheme;
use crate::layout::{BadnessTuning, HorzBox, Length, Paddings, PureHorzBox, Stretchable};
use crate::visualize::Color;

/// The ambient state that text and math are typeset in.
///
/// Contexts are snapshotted into string boxes; deriving a changed context is
/// done by cloning and updating fields.
#[derive(Debug, Clone)]
pub struct TypesetContext {
    /// The base font size.
    pub font_size: Length,
    /// Which font to use for each script.
    pub font_scheme: FontScheme,
    /// The script that stands in for characters without a distinctive one.
    pub dominant_script: Script,
    /// Inter-word spacing relative to the font size.
    pub space: SpacingRatios,
    /// The width lines are broken to.
    pub paragraph_width: Length,
    /// The distance between consecutive baselines.
    pub leading: Length,
    /// The smallest gap allowed between the bottom of one line and the top
    /// of the next.
    pub min_gap_of_lines: Length,
    /// The color of text.
    pub text_color: Color,
    /// An additional baseline shift applied to text.
    pub manual_rising: Length,
    /// The geometry of pages.
    pub page: PageScheme,
    /// Constants for badness computations.
    pub badness: BadnessTuning,
    /// The abbreviation of the font math is set in.
    pub math_font: EcoString,
    /// What to do when no font is configured for a script.
    pub font_fallback: FontFallback,
}

impl TypesetContext {
    /// The inter-word space as adjustable glue.
    pub fn space_glue(&self) -> HorzBox {
        let size = self.font_size;
        HorzBox::Pure(PureHorzBox::OuterEmpty {
            natural: size * self.space.natural,
            shrinkable: size * self.space.shrink,
            stretchable: Stretchable::Finite(size * self.space.stretch),
        })
    }

    /// A copy of this context with a different font size.
    pub fn with_font_size(&self, font_size: Length) -> Self {
        Self { font_size, ..self.clone() }
    }
}

impl Default for TypesetContext {
    fn default() -> Self {
        let page = PageScheme::default();
        Self {
            font_size: Length::pt(10.0),
            font_scheme: FontScheme::default(),
            dominant_script: Script::Latin,
            space: SpacingRatios::default(),
            paragraph_width: page.content_width(),
            leading: Length::pt(12.0),
            min_gap_of_lines: Length::pt(2.0),
            text_color: Color::BLACK,
            manual_rising: Length::zero(),
            page,
            badness: BadnessTuning::default(),
            math_font: EcoString::new(),
            font_fallback: FontFallback::default(),
        }
    }
}

/// Inter-word spacing as fractions of the font size.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingRatios {
    pub natural: f64,
    pub shrink: f64,
    pub stretch: f64,
}

impl Default for SpacingRatios {
    fn default() -> Self {
        Self { natural: 0.33, shrink: 0.08, stretch: 0.16 }
    }
}

/// The geometry of a page.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PageScheme {
    pub width: Length,
    pub height: Length,
    /// The space between the page edges and the content area.
    pub margin: Paddings,
}

impl PageScheme {
    /// The width of the content area.
    pub fn content_width(&self) -> Length {
        self.width - self.margin.horizontal()
    }

    /// The height of the content area.
    pub fn content_height(&self) -> Length {
        self.height - self.margin.vertical()
    }
}

impl Default for PageScheme {
    /// An A4 page with 25mm margins.
    fn default() -> Self {
        Self {
            width: Length::mm(210.0),
            height: Length::mm(297.0),
            margin: Paddings::splat(Length::mm(25.0)),
        }
    }
}

/// What font resolution does when no font is configured for a script.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFallback {
    /// Substitute the fallback font and log a warning.
    #[default]
    Lenient,
    /// Fail with an error.
    Strict,
}

#[cfg(test)]
mod tests {
    use quire_utils::assert_approx_eq;

    use super::*;

    #[test]
    fn test_space_glue_scales_with_font_size() {
        let ctx = TypesetContext::default().with_font_size(Length::pt(20.0));
        let HorzBox::Pure(PureHorzBox::OuterEmpty { natural, shrinkable, stretchable }) =
            ctx.space_glue()
        else {
            panic!("space is not outer glue");
        };
        assert_approx_eq!(natural, 6.6);
        assert_approx_eq!(shrinkable, 1.6);
        assert_eq!(stretchable, Stretchable::Finite(Length::pt(20.0) * 0.16));
    }

    #[test]
    fn test_page_scheme_from_toml() {
        let page: PageScheme = toml::from_str(
            r#"
            width = 400.0
            height = 600.0
            margin = { left = 20.0, right = 30.0, top = 10.0 }
            "#,
        )
        .unwrap();
        assert_eq!(page.content_width(), Length::pt(350.0));
        assert_eq!(page.content_height(), Length::pt(590.0));
    }

    #[test]
    fn test_settings_from_toml() {
        #[derive(Deserialize)]
        struct Settings {
            space: SpacingRatios,
            badness: BadnessTuning,
            font_fallback: FontFallback,
        }

        let settings: Settings = toml::from_str(
            r#"
            font_fallback = "strict"
            [space]
            natural = 0.25
            [badness]
            hyphen_badness = 500
            "#,
        )
        .unwrap();
        assert_eq!(settings.font_fallback, FontFallback::Strict);
        assert_eq!(settings.space.natural, 0.25);
        assert_eq!(settings.space.stretch, SpacingRatios::default().stretch);
        assert_eq!(settings.badness.hyphen_badness, 500);
        assert_eq!(settings.badness.max_badness, 10_000);
    }
}
