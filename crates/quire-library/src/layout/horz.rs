use std::sync::Arc;

use ecow::{EcoString, EcoVec, eco_format};
use unicode_script::Script;

use super::{EvaluatedVertBox, Length, LengthInfo, Metrics, Paddings, Stretchable};
use crate::diag::{OkOr, StrResult, bail};
use crate::math::MathStringInfo;
use crate::text::{
    FontResolver, GlyphId, ShapedText, StringInfo, TypesetContext, get_string_info,
    script_of,
};
use crate::visualize::{Decoration, FrameDecorations, Graphics};

/// Atomic horizontal content whose geometry is fixed by the content itself.
#[derive(Debug, Clone)]
pub enum PureHorzBox {
    /// Glue that takes part in justifying the enclosing line.
    OuterEmpty {
        natural: Length,
        shrinkable: Length,
        stretchable: Stretchable,
    },
    /// Glue of zero natural width with one unit of fil stretch.
    OuterFil,
    /// Space that neither shrinks nor stretches.
    FixedEmpty(Length),
    /// A run of text, shaped when it is measured.
    InnerString { ctx: Arc<TypesetContext>, text: EcoString },
    /// A single positioned glyph from a math font.
    InnerMathGlyph {
        info: MathStringInfo,
        width: Length,
        height: Length,
        depth: Length,
        glyph: GlyphId,
    },
    /// Content with its baseline shifted up by `rising`.
    Rising { rising: Length, boxes: EcoVec<HorzBox> },
    /// A frame whose content takes part in justifying the enclosing line.
    OuterFrame {
        paddings: Paddings,
        decoration: Decoration,
        boxes: EcoVec<HorzBox>,
    },
    /// A frame whose content keeps its natural width.
    InnerFrame {
        paddings: Paddings,
        decoration: Decoration,
        boxes: EcoVec<HorzBox>,
    },
    /// A frame with a declared width that its content is fitted into.
    FixedFrame {
        paddings: Paddings,
        width: Length,
        decoration: Decoration,
        boxes: EcoVec<HorzBox>,
    },
    /// Already evaluated vertical content placed inline.
    EmbeddedVert {
        width: Length,
        height: Length,
        depth: Length,
        boxes: EcoVec<EvaluatedVertBox>,
    },
    /// Inline graphics with declared extents.
    FixedGraphics {
        width: Length,
        height: Length,
        depth: Length,
        graphics: Graphics,
    },
}

impl PureHorzBox {
    /// Measure this box.
    pub fn metrics(&self, fonts: &dyn FontResolver) -> StrResult<Metrics> {
        Ok(match self {
            Self::OuterEmpty { natural, shrinkable, stretchable } => Metrics {
                width: LengthInfo::new(*natural, *shrinkable, *stretchable),
                ..Metrics::zero()
            },
            Self::OuterFil => Metrics { width: LengthInfo::fil(), ..Metrics::zero() },
            Self::FixedEmpty(width) => Metrics::rigid(*width, Length::zero(), Length::zero()),
            Self::InnerString { ctx, text } => {
                let (info, shaped) = shape_string(ctx, text, fonts)?;
                Metrics::rigid(shaped.width, shaped.height, shaped.depth).raised(info.rising)
            }
            Self::InnerMathGlyph { width, height, depth, .. } => {
                Metrics::rigid(*width, *height, *depth)
            }
            Self::Rising { rising, boxes } => measure(boxes, fonts)?.raised(*rising),
            Self::OuterFrame { paddings, boxes, .. } => {
                pad(measure(boxes, fonts)?, paddings)
            }
            Self::InnerFrame { paddings, boxes, .. } => {
                let inner = pad(measure(boxes, fonts)?, paddings);
                Metrics { width: LengthInfo::rigid(inner.width.natural), ..inner }
            }
            Self::FixedFrame { paddings, width, boxes, .. } => {
                let inner = pad(measure(boxes, fonts)?, paddings);
                Metrics { width: LengthInfo::rigid(*width), ..inner }
            }
            Self::EmbeddedVert { width, height, depth, .. }
            | Self::FixedGraphics { width, height, depth, .. } => {
                Metrics::rigid(*width, *height, *depth)
            }
        })
    }
}

/// Resolve the font of a string box and shape it.
pub(super) fn shape_string(
    ctx: &TypesetContext,
    text: &str,
    fonts: &dyn FontResolver,
) -> StrResult<(StringInfo, ShapedText)> {
    let info = get_string_info(ctx, script_of(text))?;
    let shaped = fonts
        .shape(&info, text)
        .ok_or_msg(|| eco_format!("font {} is not available", info.font))?;
    Ok((info, shaped))
}

/// Add paddings around measured content.
fn pad(inner: Metrics, paddings: &Paddings) -> Metrics {
    Metrics {
        width: inner.width + LengthInfo::rigid(paddings.horizontal()),
        height: inner.height + paddings.top,
        depth: inner.depth + paddings.bottom,
    }
}

/// Horizontal content as a breaking algorithm sees it.
#[derive(Debug, Clone)]
pub enum HorzBox {
    /// Content without break points of its own.
    Pure(PureHorzBox),
    /// An optional break point.
    Discretionary(Discretionary),
    /// A frame that may be split across lines.
    FrameBreakable(FrameBreakable),
    /// Content that belongs to one script, so that spacing can be adjusted
    /// where scripts change.
    ScriptGuard { script: Script, boxes: EcoVec<HorzBox> },
}

impl HorzBox {
    /// Measure this box as if no break happened inside it.
    pub fn metrics(&self, fonts: &dyn FontResolver) -> StrResult<Metrics> {
        match self {
            Self::Pure(pure) => pure.metrics(fonts),
            Self::Discretionary(disc) => measure(&disc.no_break, fonts),
            Self::FrameBreakable(frame) => {
                Ok(pad(measure(&frame.boxes, fonts)?, &frame.paddings))
            }
            Self::ScriptGuard { boxes, .. } => measure(boxes, fonts),
        }
    }

    /// The script of a guarded run.
    pub fn script(&self) -> Option<Script> {
        match self {
            Self::ScriptGuard { script, .. } => Some(*script),
            _ => None,
        }
    }

    /// The penalty of breaking here, if this is a break point.
    pub fn penalty(&self) -> Option<i32> {
        match self {
            Self::Discretionary(disc) => Some(disc.penalty),
            _ => None,
        }
    }
}

impl From<PureHorzBox> for HorzBox {
    fn from(pure: PureHorzBox) -> Self {
        Self::Pure(pure)
    }
}

/// Measure a list of boxes set side by side on a common baseline.
pub fn measure(boxes: &[HorzBox], fonts: &dyn FontResolver) -> StrResult<Metrics> {
    boxes.iter().map(|b| b.metrics(fonts)).sum()
}

/// Which alternative of a discretionary is realized.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BreakSide {
    /// No break happened here.
    NoBreak,
    /// The content ending the line before the break.
    PreBreak,
    /// The content starting the line after the break.
    PostBreak,
}

/// A potential break point with alternative content for each outcome.
///
/// The alternatives are reference-counted, so they may share unchanged
/// sub-boxes with each other and with the surrounding list.
#[derive(Debug, Clone)]
pub struct Discretionary {
    /// How undesirable breaking here is.
    pub penalty: i32,
    pub no_break: EcoVec<HorzBox>,
    pub pre_break: EcoVec<HorzBox>,
    pub post_break: EcoVec<HorzBox>,
}

impl Discretionary {
    /// Create a new discretionary.
    pub fn new(
        penalty: i32,
        no_break: EcoVec<HorzBox>,
        pre_break: EcoVec<HorzBox>,
        post_break: EcoVec<HorzBox>,
    ) -> Self {
        Self { penalty, no_break, pre_break, post_break }
    }

    /// A break opportunity at glue: the glue when unbroken, nothing around
    /// the break.
    pub fn at_space(penalty: i32, space: HorzBox) -> Self {
        Self::new(penalty, [space].into_iter().collect(), EcoVec::new(), EcoVec::new())
    }

    /// The alternative for a breaking decision.
    pub fn realize(&self, side: BreakSide) -> &EcoVec<HorzBox> {
        match side {
            BreakSide::NoBreak => &self.no_break,
            BreakSide::PreBreak => &self.pre_break,
            BreakSide::PostBreak => &self.post_break,
        }
    }

    /// Measure each alternative on its own, in the order no-break,
    /// pre-break, post-break.
    pub fn alternatives_metrics(&self, fonts: &dyn FontResolver) -> StrResult<[Metrics; 3]> {
        Ok([
            measure(&self.no_break, fonts)?,
            measure(&self.pre_break, fonts)?,
            measure(&self.post_break, fonts)?,
        ])
    }
}

/// Which part of a split frame a fragment is.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FramePart {
    /// The frame was not split.
    Whole,
    /// The first fragment.
    Head,
    /// A fragment between the first and the last.
    Middle,
    /// The last fragment.
    Tail,
}

/// A frame whose extent is only known once lines are broken.
#[derive(Debug, Clone)]
pub struct FrameBreakable {
    paddings: Paddings,
    min_extent: Length,
    max_extent: Length,
    decorations: FrameDecorations,
    boxes: EcoVec<HorzBox>,
}

impl FrameBreakable {
    /// Create a breakable frame.
    ///
    /// Each fragment of the frame must end up between `min_extent` and
    /// `max_extent` wide.
    pub fn new(
        paddings: Paddings,
        min_extent: Length,
        max_extent: Length,
        decorations: FrameDecorations,
        boxes: EcoVec<HorzBox>,
    ) -> StrResult<Self> {
        if min_extent < Length::zero() {
            bail!("minimum frame extent {:?} is negative", min_extent);
        }
        if min_extent > max_extent {
            bail!(
                "minimum frame extent {:?} exceeds maximum extent {:?}",
                min_extent,
                max_extent,
            );
        }
        Ok(Self { paddings, min_extent, max_extent, decorations, boxes })
    }

    pub fn paddings(&self) -> &Paddings {
        &self.paddings
    }

    /// The minimum and maximum width of a fragment.
    pub fn extents(&self) -> (Length, Length) {
        (self.min_extent, self.max_extent)
    }

    pub fn decorations(&self) -> &FrameDecorations {
        &self.decorations
    }

    /// The content of the whole frame.
    pub fn boxes(&self) -> &EcoVec<HorzBox> {
        &self.boxes
    }

    /// Whether a fragment of the given width is acceptable.
    pub fn fits(&self, width: Length) -> bool {
        self.min_extent <= width && width <= self.max_extent
    }

    /// Turn a fragment of the frame into a pure frame.
    ///
    /// The side paddings at a split are dropped, and the decoration matches
    /// the part.
    pub fn realize(&self, part: FramePart, boxes: EcoVec<HorzBox>) -> PureHorzBox {
        let mut paddings = self.paddings;
        if matches!(part, FramePart::Head | FramePart::Middle) {
            paddings.right = Length::zero();
        }
        if matches!(part, FramePart::Middle | FramePart::Tail) {
            paddings.left = Length::zero();
        }
        PureHorzBox::OuterFrame {
            paddings,
            decoration: self.decorations.get(part).clone(),
            boxes,
        }
    }
}
