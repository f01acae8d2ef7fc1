use serde::{Deserialize, Serialize};

use super::{Length, LengthInfo, Stretchable};

/// How well a list of boxes fits a required extent.
///
/// The carried number is the fraction of the available shrink or stretch
/// that is actually used.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Ratio {
    /// The content cannot stretch enough.
    TooShort,
    /// The content fits after shrinking by the given fraction of its shrink.
    PermissiblyShort(f64),
    /// The content fits after stretching by the given fraction of its
    /// stretch. Exact fits and fits absorbed by fil glue report zero.
    PermissiblyLong(f64),
    /// The content cannot shrink enough.
    TooLong,
}

impl Ratio {
    /// Classify how content with glue `info` fits into `required`.
    pub fn of(required: Length, info: LengthInfo) -> Self {
        let adjustment = required - info.natural;
        if adjustment.is_nearly_zero() {
            return Self::PermissiblyLong(0.0);
        }

        if adjustment > Length::zero() {
            match info.stretchable {
                Stretchable::Fils(n) if n > 0 => Self::PermissiblyLong(0.0),
                Stretchable::Fils(_) => Self::TooShort,
                Stretchable::Finite(stretch) if stretch.is_nearly_zero() => {
                    Self::TooShort
                }
                Stretchable::Finite(stretch) => Self::PermissiblyLong(adjustment / stretch),
            }
        } else {
            let shrink = info.shrinkable;
            if shrink.is_nearly_zero() || -adjustment > shrink {
                Self::TooLong
            } else {
                Self::PermissiblyShort(-adjustment / shrink)
            }
        }
    }

    /// Whether the content can be made to fit.
    pub fn is_permissible(self) -> bool {
        matches!(self, Self::PermissiblyShort(_) | Self::PermissiblyLong(_))
    }
}

/// Constants that shape badness computations.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct BadnessTuning {
    /// The badness a permissible fit is capped at.
    pub max_badness: u32,
    /// The badness of content that cannot stretch enough.
    pub too_short: u32,
    /// The badness of content that cannot shrink enough.
    pub too_long: u32,
    /// The penalty of breaking at an inter-word space.
    pub space_badness: i32,
    /// The penalty of breaking at a hyphenation point.
    pub hyphen_badness: i32,
}

impl Default for BadnessTuning {
    fn default() -> Self {
        Self {
            max_badness: 10_000,
            too_short: 100_000,
            too_long: 100_000,
            space_badness: 100,
            hyphen_badness: 1000,
        }
    }
}

/// The badness of a fit: `⌊100·r³⌋`, capped at the tuning's maximum.
pub fn badness(ratio: Ratio, tuning: &BadnessTuning) -> u32 {
    match ratio {
        Ratio::TooShort => tuning.too_short,
        Ratio::TooLong => tuning.too_long,
        Ratio::PermissiblyShort(r) | Ratio::PermissiblyLong(r) => {
            let raw = (100.0 * r.abs().powi(3)).floor();
            if raw >= tuning.max_badness as f64 { tuning.max_badness } else { raw as u32 }
        }
    }
}
