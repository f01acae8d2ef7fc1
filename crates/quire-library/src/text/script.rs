use std::sync::Arc;

use ecow::EcoString;
use rustc_hash::FxHashMap;
use unicode_script::{Script, UnicodeScript};

use super::{FontFallback, TypesetContext};
use crate::diag::{StrResult, bail};
use crate::layout::{HorzBox, Length, PureHorzBox};
use crate::visualize::Color;

/// Which font, at which relative size and rise, each script is set in.
pub type FontScheme = FxHashMap<Script, FontWithRatio>;

/// A font together with its size and baseline shift relative to the
/// context's font size.
#[derive(Debug, Clone, PartialEq)]
pub struct FontWithRatio {
    /// The font's abbreviation.
    pub font: EcoString,
    pub size_ratio: f64,
    pub rise_ratio: f64,
}

impl FontWithRatio {
    /// The abbreviation of the font substituted for unconfigured scripts.
    pub const FALLBACK_FONT: &'static str = "fallback";

    /// Create a new font triple.
    pub fn new(font: impl Into<EcoString>, size_ratio: f64, rise_ratio: f64) -> Self {
        Self { font: font.into(), size_ratio, rise_ratio }
    }

    /// The triple used when a script has no configured font.
    pub fn fallback() -> Self {
        Self::new(Self::FALLBACK_FONT, 1.0, 0.0)
    }
}

/// Everything needed to render a run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct StringInfo {
    /// The font's abbreviation.
    pub font: EcoString,
    /// The absolute font size.
    pub size: Length,
    pub color: Color,
    /// The absolute baseline shift.
    pub rising: Length,
}

/// Whether the script carries no information about which font to use.
pub fn is_indistinct(script: Script) -> bool {
    matches!(script, Script::Common | Script::Unknown | Script::Inherited)
}

/// Replace an indistinct script with the context's dominant script.
pub fn normalize_script(ctx: &TypesetContext, script: Script) -> Script {
    if is_indistinct(script) { ctx.dominant_script } else { script }
}

/// Look up the configured font for a script, if there is one.
pub fn lookup_font<'a>(ctx: &'a TypesetContext, script: Script) -> Option<&'a FontWithRatio> {
    ctx.font_scheme.get(&normalize_script(ctx, script))
}

/// Resolve the font for a script.
///
/// Indistinct scripts resolve through the dominant script. When nothing is
/// configured, the context's [`FontFallback`] decides between substituting
/// [`FontWithRatio::fallback`] and failing.
pub fn get_font_with_ratio(
    ctx: &TypesetContext,
    script: Script,
) -> StrResult<FontWithRatio> {
    if let Some(found) = lookup_font(ctx, script) {
        return Ok(found.clone());
    }

    let script = normalize_script(ctx, script);
    match ctx.font_fallback {
        FontFallback::Lenient => {
            log::warn!(
                "no font configured for script {}, using {}",
                script.full_name(),
                FontWithRatio::FALLBACK_FONT,
            );
            Ok(FontWithRatio::fallback())
        }
        FontFallback::Strict => {
            bail!("no font configured for script {}", script.full_name())
        }
    }
}

/// Derive the rendering parameters for a run of text in a script.
pub fn get_string_info(ctx: &TypesetContext, script: Script) -> StrResult<StringInfo> {
    let FontWithRatio { font, size_ratio, rise_ratio } = get_font_with_ratio(ctx, script)?;
    Ok(StringInfo {
        font,
        size: ctx.font_size * size_ratio,
        color: ctx.text_color,
        rising: ctx.manual_rising + ctx.font_size * rise_ratio,
    })
}

/// The first distinct script in the text, or `Common` if there is none.
pub fn script_of(text: &str) -> Script {
    text.chars()
        .map(|c| c.script())
        .find(|&s| !is_indistinct(s))
        .unwrap_or(Script::Common)
}

/// Turn a run of text into string boxes, one per script run, with word
/// spaces from the context in between.
///
/// Each string is wrapped in a [`HorzBox::ScriptGuard`] naming its script.
/// Indistinct characters such as digits and punctuation stay with the run
/// they occur in; a run of only indistinct characters takes the dominant
/// script.
pub fn split_by_script(ctx: &Arc<TypesetContext>, text: &str) -> Vec<HorzBox> {
    let mut boxes = vec![];
    let mut run = EcoString::new();
    let mut current: Option<Script> = None;

    let flush = |run: &mut EcoString, script: Option<Script>, boxes: &mut Vec<HorzBox>| {
        if !run.is_empty() {
            let text = std::mem::take(run);
            let string = PureHorzBox::InnerString { ctx: ctx.clone(), text };
            boxes.push(HorzBox::ScriptGuard {
                script: normalize_script(ctx, script.unwrap_or(Script::Common)),
                boxes: [HorzBox::from(string)].into_iter().collect(),
            });
        }
    };

    for c in text.chars() {
        if c == ' ' {
            flush(&mut run, current, &mut boxes);
            current = None;
            boxes.push(ctx.space_glue());
            continue;
        }

        let script = c.script();
        if !is_indistinct(script) {
            match current {
                Some(prev) if prev != script => {
                    flush(&mut run, current, &mut boxes);
                    current = Some(script);
                }
                None => current = Some(script),
                _ => {}
            }
        }
        run.push(c);
    }

    flush(&mut run, current, &mut boxes);
    boxes
}
