use ecow::EcoVec;

use super::{
    BadnessTuning, BreakSide, FramePart, HorzBox, IntermediateVertBox, Length, LengthInfo,
    Metrics, Paddings, PureHorzBox, Ratio, Stretchable, badness, measure, shape_string,
};
use crate::diag::StrResult;
use crate::math::MathStringInfo;
use crate::text::{FontResolver, GlyphId, ShapedText, StringInfo};
use crate::visualize::{Decoration, Graphics};

/// A horizontal box after breaking, with every width resolved.
///
/// Evaluated boxes cannot be built directly; they come out of
/// [`CommittedLine::evaluate`].
///
/// ```compile_fail
/// use quire_library::layout::{EvaluatedHorzBox, EvaluatedHorzBoxMain, Length};
///
/// let _ = EvaluatedHorzBox { width: Length::pt(1.0), main: EvaluatedHorzBoxMain::Empty };
/// ```
///
/// ```compile_fail
/// use quire_library::layout::{EvaluatedHorzBoxMain, Length};
///
/// let _ = EvaluatedHorzBoxMain::EmbeddedVert {
///     height: Length::zero(),
///     depth: Length::zero(),
///     boxes: Default::default(),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct EvaluatedHorzBox {
    width: Length,
    main: EvaluatedHorzBoxMain,
}

impl EvaluatedHorzBox {
    fn new(width: Length, main: EvaluatedHorzBoxMain) -> Self {
        Self { width, main }
    }

    fn empty(width: Length) -> Self {
        Self::new(width, EvaluatedHorzBoxMain::Empty)
    }

    /// The resolved width.
    pub fn width(&self) -> Length {
        self.width
    }

    /// What the box contains.
    pub fn main(&self) -> &EvaluatedHorzBoxMain {
        &self.main
    }

    /// The extent above the baseline.
    pub fn height(&self) -> Length {
        match self.main {
            EvaluatedHorzBoxMain::Empty => Length::zero(),
            EvaluatedHorzBoxMain::String { height, .. }
            | EvaluatedHorzBoxMain::MathGlyph { height, .. }
            | EvaluatedHorzBoxMain::Rising { height, .. }
            | EvaluatedHorzBoxMain::Frame { height, .. }
            | EvaluatedHorzBoxMain::EmbeddedVert { height, .. }
            | EvaluatedHorzBoxMain::InlineGraphics { height, .. } => height,
        }
    }

    /// The extent below the baseline.
    pub fn depth(&self) -> Length {
        match self.main {
            EvaluatedHorzBoxMain::Empty => Length::zero(),
            EvaluatedHorzBoxMain::String { depth, .. }
            | EvaluatedHorzBoxMain::MathGlyph { depth, .. }
            | EvaluatedHorzBoxMain::Rising { depth, .. }
            | EvaluatedHorzBoxMain::Frame { depth, .. }
            | EvaluatedHorzBoxMain::EmbeddedVert { depth, .. }
            | EvaluatedHorzBoxMain::InlineGraphics { depth, .. } => depth,
        }
    }
}

/// The content of an [`EvaluatedHorzBox`].
#[derive(Debug, Clone)]
pub enum EvaluatedHorzBoxMain {
    /// Shaped text. Height and depth include the baseline shift.
    #[non_exhaustive]
    String {
        info: StringInfo,
        height: Length,
        depth: Length,
        text: ShapedText,
    },
    #[non_exhaustive]
    MathGlyph {
        info: MathStringInfo,
        height: Length,
        depth: Length,
        glyph: GlyphId,
    },
    /// Content drawn `rising` above the baseline.
    #[non_exhaustive]
    Rising {
        height: Length,
        depth: Length,
        rising: Length,
        boxes: EcoVec<EvaluatedHorzBox>,
    },
    /// White space.
    Empty,
    /// A decorated frame. The paddings are part of the children as leading
    /// and trailing empty boxes.
    #[non_exhaustive]
    Frame {
        height: Length,
        depth: Length,
        decoration: Decoration,
        boxes: EcoVec<EvaluatedHorzBox>,
    },
    #[non_exhaustive]
    EmbeddedVert {
        height: Length,
        depth: Length,
        boxes: EcoVec<EvaluatedVertBox>,
    },
    #[non_exhaustive]
    InlineGraphics {
        height: Length,
        depth: Length,
        graphics: Graphics,
    },
}

/// How the glue of a box list is set to reach a target width.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GlueSet {
    /// All glue keeps its natural width.
    Natural,
    /// Every glue gives up this fraction of its shrink.
    Shrink(f64),
    /// Every glue takes this fraction of its finite stretch.
    Stretch(f64),
    /// Each unit of fil stretch takes this length; finite stretch is unused.
    Fil(Length),
}

impl GlueSet {
    /// Determine how to set glue `info` to fill `target`.
    ///
    /// Content that cannot stretch enough stays natural. Content that cannot
    /// shrink enough shrinks fully and overflows.
    pub fn new(target: Length, info: LengthInfo) -> Self {
        let adjustment = target - info.natural;
        if adjustment.is_nearly_zero() {
            return Self::Natural;
        }

        if adjustment > Length::zero() {
            match info.stretchable {
                Stretchable::Fils(n) if n > 0 => Self::Fil(adjustment / n as f64),
                Stretchable::Finite(stretch) if !stretch.is_nearly_zero() => {
                    Self::Stretch(adjustment / stretch)
                }
                _ => Self::Natural,
            }
        } else if info.shrinkable.is_nearly_zero() {
            Self::Natural
        } else {
            Self::Shrink((-adjustment / info.shrinkable).min(1.0))
        }
    }

    /// The width of a single glue under this setting.
    pub fn width(self, natural: Length, shrinkable: Length, stretchable: Stretchable) -> Length {
        match (self, stretchable) {
            (Self::Natural, _) => natural,
            (Self::Shrink(r), _) => natural - shrinkable * r,
            (Self::Stretch(r), Stretchable::Finite(stretch)) => natural + stretch * r,
            (Self::Fil(share), Stretchable::Fils(n)) => natural + share * n as f64,
            (Self::Stretch(_) | Self::Fil(_), _) => natural,
        }
    }
}

/// The pure content of one line after the breaker has decided on it.
///
/// Discretionaries still in the content are realized unbroken, breakable
/// frames as a whole.
#[derive(Debug, Clone)]
pub struct CommittedLine {
    boxes: EcoVec<HorzBox>,
    width: Length,
    metrics: Metrics,
    ratio: Ratio,
    set: GlueSet,
}

impl CommittedLine {
    /// Commit content to a line of the given width.
    pub fn new(
        boxes: EcoVec<HorzBox>,
        width: Length,
        fonts: &dyn FontResolver,
    ) -> StrResult<Self> {
        let metrics = measure(&boxes, fonts)?;
        let ratio = Ratio::of(width, metrics.width);
        let set = GlueSet::new(width, metrics.width);
        log::trace!("committed line of {} boxes to {width:?}: {ratio:?}", boxes.len());
        Ok(Self { boxes, width, metrics, ratio, set })
    }

    /// The width the line is set to.
    pub fn width(&self) -> Length {
        self.width
    }

    /// The natural metrics of the content.
    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    /// How well the content fits the line.
    pub fn ratio(&self) -> Ratio {
        self.ratio
    }

    /// The badness of the fit.
    pub fn badness(&self, tuning: &BadnessTuning) -> u32 {
        badness(self.ratio, tuning)
    }

    /// Resolve the widths of all boxes in the line.
    pub fn evaluate(&self, fonts: &dyn FontResolver) -> StrResult<EcoVec<EvaluatedHorzBox>> {
        let mut out = EcoVec::with_capacity(self.boxes.len());
        evaluate_horz(&self.boxes, self.set, fonts, &mut out)?;
        Ok(out)
    }

    /// Evaluate the line into an item of a vertical list.
    pub fn into_intermediate(self, fonts: &dyn FontResolver) -> StrResult<IntermediateVertBox> {
        let boxes = self.evaluate(fonts)?;
        Ok(IntermediateVertBox::Line {
            height: self.metrics.height,
            depth: self.metrics.depth,
            boxes,
        })
    }
}

/// Evaluate a list of boxes whose glue is set by `set`.
fn evaluate_horz(
    boxes: &[HorzBox],
    set: GlueSet,
    fonts: &dyn FontResolver,
    out: &mut EcoVec<EvaluatedHorzBox>,
) -> StrResult<()> {
    for b in boxes {
        match b {
            HorzBox::Pure(pure) => out.push(evaluate_pure(pure, set, fonts)?),
            HorzBox::Discretionary(disc) => {
                evaluate_horz(disc.realize(BreakSide::NoBreak), set, fonts, out)?
            }
            HorzBox::FrameBreakable(frame) => {
                let whole = frame.realize(FramePart::Whole, frame.boxes().clone());
                out.push(evaluate_pure(&whole, set, fonts)?);
            }
            HorzBox::ScriptGuard { boxes, .. } => evaluate_horz(boxes, set, fonts, out)?,
        }
    }
    Ok(())
}

fn evaluate_pure(
    pure: &PureHorzBox,
    set: GlueSet,
    fonts: &dyn FontResolver,
) -> StrResult<EvaluatedHorzBox> {
    Ok(match pure {
        PureHorzBox::OuterEmpty { natural, shrinkable, stretchable } => {
            EvaluatedHorzBox::empty(set.width(*natural, *shrinkable, *stretchable))
        }
        PureHorzBox::OuterFil => EvaluatedHorzBox::empty(set.width(
            Length::zero(),
            Length::zero(),
            Stretchable::Fils(1),
        )),
        PureHorzBox::FixedEmpty(width) => EvaluatedHorzBox::empty(*width),
        PureHorzBox::InnerString { ctx, text } => {
            let (info, shaped) = shape_string(ctx, text, fonts)?;
            let main = EvaluatedHorzBoxMain::String {
                height: shaped.height + info.rising,
                depth: shaped.depth - info.rising,
                info,
                text: shaped.clone(),
            };
            EvaluatedHorzBox::new(shaped.width, main)
        }
        PureHorzBox::InnerMathGlyph { info, width, height, depth, glyph } => {
            let main = EvaluatedHorzBoxMain::MathGlyph {
                info: info.clone(),
                height: *height,
                depth: *depth,
                glyph: *glyph,
            };
            EvaluatedHorzBox::new(*width, main)
        }
        PureHorzBox::Rising { rising, boxes } => {
            let mut children = EcoVec::new();
            evaluate_horz(boxes, set, fonts, &mut children)?;
            let (width, height, depth) = extents(&children);
            let main = EvaluatedHorzBoxMain::Rising {
                height: height + *rising,
                depth: depth - *rising,
                rising: *rising,
                boxes: children,
            };
            EvaluatedHorzBox::new(width, main)
        }
        PureHorzBox::OuterFrame { paddings, decoration, boxes } => {
            evaluate_frame(paddings, decoration, boxes, set, fonts)?
        }
        PureHorzBox::InnerFrame { paddings, decoration, boxes } => {
            evaluate_frame(paddings, decoration, boxes, GlueSet::Natural, fonts)?
        }
        PureHorzBox::FixedFrame { paddings, width, decoration, boxes } => {
            let inner = measure(boxes, fonts)?;
            let set = GlueSet::new(*width - paddings.horizontal(), inner.width);
            let frame = evaluate_frame(paddings, decoration, boxes, set, fonts)?;
            EvaluatedHorzBox { width: *width, ..frame }
        }
        PureHorzBox::EmbeddedVert { width, height, depth, boxes } => {
            let main = EvaluatedHorzBoxMain::EmbeddedVert {
                height: *height,
                depth: *depth,
                boxes: boxes.clone(),
            };
            EvaluatedHorzBox::new(*width, main)
        }
        PureHorzBox::FixedGraphics { width, height, depth, graphics } => {
            let main = EvaluatedHorzBoxMain::InlineGraphics {
                height: *height,
                depth: *depth,
                graphics: graphics.clone(),
            };
            EvaluatedHorzBox::new(*width, main)
        }
    })
}

fn evaluate_frame(
    paddings: &Paddings,
    decoration: &Decoration,
    boxes: &[HorzBox],
    set: GlueSet,
    fonts: &dyn FontResolver,
) -> StrResult<EvaluatedHorzBox> {
    let mut children = EcoVec::with_capacity(boxes.len() + 2);
    children.push(EvaluatedHorzBox::empty(paddings.left));
    evaluate_horz(boxes, set, fonts, &mut children)?;
    children.push(EvaluatedHorzBox::empty(paddings.right));

    let (width, height, depth) = extents(&children);
    let main = EvaluatedHorzBoxMain::Frame {
        height: height + paddings.top,
        depth: depth + paddings.bottom,
        decoration: decoration.clone(),
        boxes: children,
    };
    Ok(EvaluatedHorzBox::new(width, main))
}

/// Total width, maximum height and maximum depth of evaluated boxes.
fn extents(boxes: &[EvaluatedHorzBox]) -> (Length, Length, Length) {
    boxes.iter().fold(
        (Length::zero(), Length::zero(), Length::zero()),
        |(width, height, depth), b| {
            (width + b.width, height.max(b.height()), depth.max(b.depth()))
        },
    )
}

/// A vertical box after page breaking.
///
/// Only [`CommittedPage::evaluate`] produces these.
///
/// ```compile_fail
/// use quire_library::layout::{EvaluatedVertBox, Length};
///
/// let _ = EvaluatedVertBox::FixedEmpty(Length::pt(1.0));
/// ```
#[derive(Debug, Clone)]
pub enum EvaluatedVertBox {
    /// An evaluated line.
    #[non_exhaustive]
    Line {
        height: Length,
        depth: Length,
        boxes: EcoVec<EvaluatedHorzBox>,
    },
    /// Vertical white space.
    #[non_exhaustive]
    FixedEmpty(Length),
    /// A decorated frame. `height` is the full extent including paddings.
    #[non_exhaustive]
    Frame {
        paddings: Paddings,
        decoration: Decoration,
        width: Length,
        height: Length,
        boxes: EcoVec<EvaluatedVertBox>,
    },
}

impl EvaluatedVertBox {
    /// How much vertical space the box takes.
    pub fn extent(&self) -> Length {
        match self {
            Self::Line { height, depth, .. } => *height + *depth,
            Self::FixedEmpty(length) => *length,
            Self::Frame { height, .. } => *height,
        }
    }
}

/// The content of one page after the breaker has decided on it.
#[derive(Debug, Clone)]
pub struct CommittedPage {
    boxes: EcoVec<IntermediateVertBox>,
}

impl CommittedPage {
    /// Commit content to a page.
    pub fn new(boxes: EcoVec<IntermediateVertBox>) -> Self {
        Self { boxes }
    }

    /// The content as committed.
    pub fn boxes(&self) -> &EcoVec<IntermediateVertBox> {
        &self.boxes
    }

    /// Collapse margins and evaluate frames.
    ///
    /// A run of adjacent margins becomes a single gap of the largest length.
    /// At the top and bottom of the page, breakable margins are dropped
    /// before collapsing. Fixed breakable gaps become plain space.
    pub fn evaluate(&self) -> EcoVec<EvaluatedVertBox> {
        let mut stack = vec![Level::new(&self.boxes, None)];
        loop {
            // The bottom of the stack is the page and is only popped at the
            // end, so the stack is never empty here.
            let Some(level) = stack.last_mut() else { return EcoVec::new() };
            let at_page = level.frame.is_none();

            let Some(item) = level.iter.next() else {
                let edge = at_page;
                level.flush(edge);
                let Some(done) = stack.pop() else { return EcoVec::new() };
                let boxes: EcoVec<_> = done.out.into_iter().collect();
                match (done.frame, stack.last_mut()) {
                    (Some(frame), Some(parent)) => parent.out.push(frame.finish(boxes)),
                    _ => return boxes,
                }
                continue;
            };

            match item {
                IntermediateVertBox::TopMargin { breakable, length }
                | IntermediateVertBox::BottomMargin { breakable, length } => {
                    level.margins.push((*breakable, *length));
                }
                IntermediateVertBox::Line { height, depth, boxes } => {
                    level.flush(at_page && level.out.is_empty());
                    level.out.push(EvaluatedVertBox::Line {
                        height: *height,
                        depth: *depth,
                        boxes: boxes.clone(),
                    });
                }
                IntermediateVertBox::FixedBreakable(length) => {
                    level.flush(at_page && level.out.is_empty());
                    level.out.push(EvaluatedVertBox::FixedEmpty(*length));
                }
                IntermediateVertBox::Frame { paddings, decorations, part, width, boxes } => {
                    level.flush(at_page && level.out.is_empty());
                    let frame = OpenFrame {
                        paddings: *paddings,
                        decoration: decorations.get(*part).clone(),
                        width: *width,
                    };
                    stack.push(Level::new(boxes, Some(frame)));
                }
            }
        }
    }
}

/// A vertical list being evaluated.
struct Level<'a> {
    iter: std::slice::Iter<'a, IntermediateVertBox>,
    frame: Option<OpenFrame>,
    margins: Vec<(bool, Length)>,
    out: Vec<EvaluatedVertBox>,
}

impl<'a> Level<'a> {
    fn new(boxes: &'a [IntermediateVertBox], frame: Option<OpenFrame>) -> Self {
        Self { iter: boxes.iter(), frame, margins: vec![], out: vec![] }
    }

    /// Turn pending margins into a single gap. At a page edge, breakable
    /// margins are dropped.
    fn flush(&mut self, edge: bool) {
        if self.margins.is_empty() {
            return;
        }

        let count = self.margins.len();
        let kept = self
            .margins
            .drain(..)
            .filter(|&(breakable, _)| !edge || !breakable)
            .map(|(_, length)| length)
            .max();

        log::debug!("collapsed {count} margins into {kept:?}");
        if let Some(length) = kept {
            self.out.push(EvaluatedVertBox::FixedEmpty(length));
        }
    }
}

/// The frame a [`Level`] is the content of.
struct OpenFrame {
    paddings: Paddings,
    decoration: Decoration,
    width: Length,
}

impl OpenFrame {
    fn finish(self, boxes: EcoVec<EvaluatedVertBox>) -> EvaluatedVertBox {
        let content: Length = boxes.iter().map(EvaluatedVertBox::extent).sum();
        let height = content + self.paddings.vertical();
        EvaluatedVertBox::Frame {
            paddings: self.paddings,
            decoration: self.decoration,
            width: self.width,
            height,
            boxes,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use unicode_script::Script;

    use super::*;
    use crate::layout::{Discretionary, FrameBreakable, Point};
    use crate::text::testing::StubFonts;
    use crate::text::{FontWithRatio, TypesetContext};
    use crate::visualize::{Color, FrameDecorations};

    fn context() -> Arc<TypesetContext> {
        let mut ctx = TypesetContext::default();
        ctx.font_scheme.insert(Script::Latin, FontWithRatio::new("serif", 1.0, 0.0));
        Arc::new(ctx)
    }

    fn string(ctx: &Arc<TypesetContext>, text: &str) -> HorzBox {
        PureHorzBox::InnerString { ctx: ctx.clone(), text: text.into() }.into()
    }

    fn glue(natural: f64, shrink: f64, stretch: Stretchable) -> HorzBox {
        PureHorzBox::OuterEmpty {
            natural: Length::pt(natural),
            shrinkable: Length::pt(shrink),
            stretchable: stretch,
        }
        .into()
    }

    fn fixed(pt: f64) -> HorzBox {
        PureHorzBox::FixedEmpty(Length::pt(pt)).into()
    }

    fn commit(
        boxes: impl IntoIterator<Item = HorzBox>,
        width: f64,
        fonts: &StubFonts,
    ) -> StrResult<CommittedLine> {
        CommittedLine::new(boxes.into_iter().collect(), Length::pt(width), fonts)
    }

    fn widths(boxes: &[EvaluatedHorzBox]) -> Vec<f64> {
        boxes.iter().map(|b| b.width().to_pt()).collect()
    }

    fn line(pt: f64) -> IntermediateVertBox {
        let fonts = StubFonts::default();
        let rule = PureHorzBox::FixedGraphics {
            width: Length::pt(1.0),
            height: Length::pt(pt),
            depth: Length::zero(),
            graphics: Graphics::new(|_| vec![]),
        };
        commit([rule.into()], 1.0, &fonts)
            .and_then(|line| line.into_intermediate(&fonts))
            .unwrap()
    }

    fn top(breakable: bool, pt: f64) -> IntermediateVertBox {
        IntermediateVertBox::TopMargin { breakable, length: Length::pt(pt) }
    }

    fn bottom(breakable: bool, pt: f64) -> IntermediateVertBox {
        IntermediateVertBox::BottomMargin { breakable, length: Length::pt(pt) }
    }

    fn extents(boxes: &[EvaluatedVertBox]) -> Vec<f64> {
        boxes.iter().map(|b| b.extent().to_pt()).collect()
    }

    #[test]
    fn test_exact_fit_with_fil_glue() {
        let fonts = StubFonts::default();
        let ctx = context();
        let fil = glue(2.0, 0.0, Stretchable::Fils(1));
        let boxes = [string(&ctx, "ab"), fil, string(&ctx, "ab")];
        let line = commit(boxes, 22.0, &fonts).unwrap();
        assert_eq!(line.metrics().width.natural, Length::pt(22.0));
        assert_eq!(line.ratio(), Ratio::PermissiblyLong(0.0));
        assert_eq!(line.badness(&BadnessTuning::default()), 0);
        assert_eq!(widths(&line.evaluate(&fonts).unwrap()), [10.0, 2.0, 10.0]);
    }

    #[test]
    fn test_fil_glue_takes_all_stretch() {
        let fonts = StubFonts::default();
        let ctx = context();
        let boxes = [
            glue(0.0, 0.0, Stretchable::Fils(1)),
            string(&ctx, "ab"),
            glue(1.0, 0.0, Stretchable::Finite(Length::pt(5.0))),
            PureHorzBox::OuterFil.into(),
            glue(0.0, 0.0, Stretchable::Fils(2)),
        ];
        let line = commit(boxes, 51.0, &fonts).unwrap();
        assert_eq!(line.ratio(), Ratio::PermissiblyLong(0.0));
        let evaluated = line.evaluate(&fonts).unwrap();
        assert_eq!(widths(&evaluated), [10.0, 10.0, 1.0, 10.0, 20.0]);
    }

    #[test]
    fn test_cancelled_fil_glue_leaves_line_short() {
        let fonts = StubFonts::default();
        let cancel = glue(0.0, 0.0, Stretchable::Fils(-1));
        let boxes = [fixed(20.0), PureHorzBox::OuterFil.into(), cancel];
        let line = commit(boxes, 30.0, &fonts).unwrap();
        assert_eq!(line.metrics().width.stretchable, Stretchable::Fils(0));
        assert_eq!(line.ratio(), Ratio::TooShort);
        let tuning = BadnessTuning::default();
        assert_eq!(line.badness(&tuning), tuning.too_short);
        assert_eq!(widths(&line.evaluate(&fonts).unwrap()), [20.0, 0.0, 0.0]);
    }

    #[test]
    fn test_finite_glue_stretches_and_shrinks() {
        let fonts = StubFonts::default();
        let boxes: EcoVec<_> = [
            fixed(10.0),
            glue(4.0, 2.0, Stretchable::Finite(Length::pt(4.0))),
            fixed(10.0),
            glue(4.0, 2.0, Stretchable::Finite(Length::pt(4.0))),
        ]
        .into_iter()
        .collect();

        let long = CommittedLine::new(boxes.clone(), Length::pt(32.0), &fonts).unwrap();
        assert_eq!(long.ratio(), Ratio::PermissiblyLong(0.5));
        assert_eq!(widths(&long.evaluate(&fonts).unwrap()), [10.0, 6.0, 10.0, 6.0]);

        let short = CommittedLine::new(boxes.clone(), Length::pt(26.0), &fonts).unwrap();
        assert_eq!(short.ratio(), Ratio::PermissiblyShort(0.5));
        assert_eq!(widths(&short.evaluate(&fonts).unwrap()), [10.0, 3.0, 10.0, 3.0]);

        let overfull = CommittedLine::new(boxes, Length::pt(10.0), &fonts).unwrap();
        assert_eq!(overfull.ratio(), Ratio::TooLong);
        assert_eq!(widths(&overfull.evaluate(&fonts).unwrap()), [10.0, 2.0, 10.0, 2.0]);
    }

    #[test]
    fn test_frames_set_their_children() {
        let fonts = StubFonts::default();
        let content: EcoVec<_> =
            [fixed(4.0), glue(2.0, 0.0, Stretchable::Finite(Length::pt(2.0)))]
                .into_iter()
                .collect();
        let paddings = Paddings::splat(Length::pt(1.0));
        let outer = PureHorzBox::OuterFrame {
            paddings,
            decoration: Decoration::empty(),
            boxes: content.clone(),
        };
        let inner = PureHorzBox::InnerFrame {
            paddings,
            decoration: Decoration::empty(),
            boxes: content.clone(),
        };
        let fixed_frame = PureHorzBox::FixedFrame {
            paddings,
            width: Length::pt(12.0),
            decoration: Decoration::empty(),
            boxes: content,
        };
        let boxes: EcoVec<HorzBox> =
            [outer.into(), inner.into(), fixed_frame.into()].into_iter().collect();

        // Natural: 8 + 8 + 12 = 28; the outer frame absorbs 2pt.
        let line = CommittedLine::new(boxes, Length::pt(30.0), &fonts).unwrap();
        let evaluated = line.evaluate(&fonts).unwrap();
        assert_eq!(widths(&evaluated), [10.0, 8.0, 12.0]);

        let children = |b: &EvaluatedHorzBox| match b.main() {
            EvaluatedHorzBoxMain::Frame { boxes, .. } => widths(boxes),
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(children(&evaluated[0]), [1.0, 4.0, 4.0, 1.0]);
        assert_eq!(children(&evaluated[1]), [1.0, 4.0, 2.0, 1.0]);
        assert_eq!(children(&evaluated[2]), [1.0, 4.0, 6.0, 1.0]);
        assert_eq!(evaluated[0].height(), Length::pt(1.0));
        assert_eq!(evaluated[0].depth(), Length::pt(1.0));
    }

    #[test]
    fn test_unbroken_alternatives_are_realized() {
        let fonts = StubFonts::default();
        let ctx = context();
        let disc = Discretionary::new(
            0,
            [fixed(3.0)].into_iter().collect(),
            [fixed(7.0)].into_iter().collect(),
            EcoVec::new(),
        );
        let frame = FrameBreakable::new(
            Paddings::zero(),
            Length::zero(),
            Length::inf(),
            FrameDecorations::uniform(Decoration::empty()),
            [string(&ctx, "a")].into_iter().collect(),
        )
        .unwrap();
        let guard = HorzBox::ScriptGuard {
            script: Script::Latin,
            boxes: [string(&ctx, "abc")].into_iter().collect(),
        };
        let boxes = [HorzBox::Discretionary(disc), HorzBox::FrameBreakable(frame), guard];
        let line = commit(boxes, 23.0, &fonts).unwrap();
        assert_eq!(widths(&line.evaluate(&fonts).unwrap()), [3.0, 5.0, 15.0]);
    }

    #[test]
    fn test_rising_string_extents() {
        let fonts = StubFonts::default();
        let mut ctx = (*context()).clone();
        ctx.manual_rising = Length::pt(1.0);
        let ctx = Arc::new(ctx);
        let rising = PureHorzBox::Rising {
            rising: Length::pt(2.0),
            boxes: [string(&ctx, "a")].into_iter().collect(),
        };
        let line = commit([rising.into()], 5.0, &fonts).unwrap();
        let evaluated = line.evaluate(&fonts).unwrap();
        assert_eq!(evaluated[0].height(), Length::pt(10.0));
        assert_eq!(evaluated[0].depth(), Length::pt(-1.0));
        assert_eq!(line.metrics().height, Length::pt(10.0));
    }

    #[test]
    fn test_missing_font_surfaces_as_error() {
        let fonts = StubFonts::new(&[]);
        let ctx = context();
        let err = commit([string(&ctx, "a")], 5.0, &fonts).unwrap_err();
        assert!(err.contains("serif"));
    }

    #[test]
    fn test_page_collapses_margins() {
        let boxes = [
            line(10.0),
            bottom(true, 4.0),
            top(false, 6.0),
            top(true, 3.0),
            line(10.0),
        ];
        let page = CommittedPage::new(boxes.into_iter().collect());
        assert_eq!(extents(&page.evaluate()), [10.0, 6.0, 10.0]);
    }

    #[test]
    fn test_page_drops_breakable_margins_at_edges() {
        let boxes = [
            top(true, 8.0),
            top(false, 2.0),
            line(10.0),
            IntermediateVertBox::FixedBreakable(Length::pt(3.0)),
            line(10.0),
            bottom(true, 9.0),
        ];
        let page = CommittedPage::new(boxes.into_iter().collect());
        assert_eq!(extents(&page.evaluate()), [2.0, 10.0, 3.0, 10.0]);

        let boxes = [top(true, 8.0), bottom(true, 1.0)];
        let page = CommittedPage::new(boxes.into_iter().collect());
        assert!(page.evaluate().is_empty());
    }

    #[test]
    fn test_page_evaluates_nested_frames() {
        let stroke = Decoration::stroke(Length::pt(1.0), Color::BLACK);
        let decorations = FrameDecorations {
            whole: Decoration::empty(),
            head: stroke.clone(),
            middle: Decoration::empty(),
            tail: Decoration::empty(),
        };
        let inner = IntermediateVertBox::Frame {
            paddings: Paddings::splat(Length::pt(1.0)),
            decorations: decorations.clone(),
            part: FramePart::Whole,
            width: Length::pt(50.0),
            boxes: [top(true, 5.0), line(10.0)].into_iter().collect(),
        };
        let outer = IntermediateVertBox::Frame {
            paddings: Paddings::splat(Length::pt(2.0)),
            decorations,
            part: FramePart::Head,
            width: Length::pt(60.0),
            boxes: [inner, bottom(true, 4.0)].into_iter().collect(),
        };
        let page = CommittedPage::new([top(true, 7.0), outer].into_iter().collect());
        let evaluated = page.evaluate();

        // Inner: 5 + 10 + 2 = 17. Outer: 17 + 4 + 4 = 25.
        assert_eq!(extents(&evaluated), [25.0]);
        let EvaluatedVertBox::Frame { boxes, decoration, width, .. } = &evaluated[0] else {
            panic!("expected a frame");
        };
        assert_eq!(*width, Length::pt(60.0));
        assert_eq!(extents(boxes), [17.0, 4.0]);
        let ops = decoration.draw(Point::zero(), *width, Length::pt(25.0), Length::zero());
        assert!(!ops.is_empty());
    }

    #[test]
    fn test_glue_set() {
        let info = LengthInfo::new(
            Length::pt(10.0),
            Length::pt(2.0),
            Stretchable::Finite(Length::pt(4.0)),
        );
        assert_eq!(GlueSet::new(Length::pt(10.0), info), GlueSet::Natural);
        assert_eq!(GlueSet::new(Length::pt(12.0), info), GlueSet::Stretch(0.5));
        assert_eq!(GlueSet::new(Length::pt(9.0), info), GlueSet::Shrink(0.5));
        assert_eq!(GlueSet::new(Length::pt(1.0), info), GlueSet::Shrink(1.0));
        let fil = LengthInfo { stretchable: Stretchable::Fils(4), ..info };
        assert_eq!(GlueSet::new(Length::pt(30.0), fil), GlueSet::Fil(Length::pt(5.0)));
    }
}
