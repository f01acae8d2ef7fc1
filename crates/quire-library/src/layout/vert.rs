use std::sync::Arc;

use ecow::EcoVec;

use super::{EvaluatedHorzBox, FramePart, HorzBox, Length, Paddings};
use crate::text::TypesetContext;
use crate::visualize::FrameDecorations;

/// Vertical content as a page breaker sees it.
#[derive(Debug, Clone)]
pub enum VertBox {
    /// Horizontal content still to be broken into lines, in the context
    /// that supplies width and leading.
    Paragraph { ctx: Arc<TypesetContext>, boxes: EcoVec<HorzBox> },
    /// A gap that disappears at a page break.
    FixedBreakable(Length),
    /// Space above the content that follows.
    TopMargin { breakable: bool, length: Length },
    /// Space below the content that precedes.
    BottomMargin { breakable: bool, length: Length },
    /// A decorated block that may be split across pages.
    Frame {
        paddings: Paddings,
        decorations: FrameDecorations,
        width: Length,
        boxes: EcoVec<VertBox>,
    },
}

impl VertBox {
    /// The extent of the box if it does not depend on breaking.
    pub fn fixed_extent(&self) -> Option<Length> {
        match self {
            Self::FixedBreakable(length)
            | Self::TopMargin { length, .. }
            | Self::BottomMargin { length, .. } => Some(*length),
            Self::Paragraph { .. } | Self::Frame { .. } => None,
        }
    }

    /// Whether the box is a margin.
    pub fn is_margin(&self) -> bool {
        matches!(self, Self::TopMargin { .. } | Self::BottomMargin { .. })
    }
}

/// Vertical content after line breaking but before page breaking.
///
/// Lines cannot be made up from outside this crate:
///
/// ```compile_fail
/// use quire_library::layout::{IntermediateVertBox, Length};
///
/// let _ = IntermediateVertBox::Line {
///     height: Length::zero(),
///     depth: Length::zero(),
///     boxes: Default::default(),
/// };
/// ```
#[derive(Debug, Clone)]
pub enum IntermediateVertBox {
    /// An evaluated line, only obtainable from
    /// [`CommittedLine::into_intermediate`](super::CommittedLine::into_intermediate).
    #[non_exhaustive]
    Line {
        height: Length,
        depth: Length,
        boxes: EcoVec<EvaluatedHorzBox>,
    },
    FixedBreakable(Length),
    TopMargin { breakable: bool, length: Length },
    BottomMargin { breakable: bool, length: Length },
    /// The part of a frame that ended up on one page.
    Frame {
        paddings: Paddings,
        decorations: FrameDecorations,
        part: FramePart,
        width: Length,
        boxes: EcoVec<IntermediateVertBox>,
    },
}

impl IntermediateVertBox {
    /// How much vertical space the box takes before margins collapse.
    pub fn extent(&self) -> Length {
        match self {
            Self::Line { height, depth, .. } => *height + *depth,
            Self::FixedBreakable(length)
            | Self::TopMargin { length, .. }
            | Self::BottomMargin { length, .. } => *length,
            Self::Frame { paddings, boxes, .. } => {
                boxes.iter().map(Self::extent).sum::<Length>() + paddings.vertical()
            }
        }
    }
}

/// The gap between two consecutive lines so that their baselines are
/// `leading` apart, but at least `min_gap_of_lines`.
pub fn line_gap(ctx: &TypesetContext, prev_depth: Length, next_height: Length) -> Length {
    (ctx.leading - prev_depth - next_height).max(ctx.min_gap_of_lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{CommittedLine, PureHorzBox};
    use crate::text::testing::StubFonts;
    use crate::visualize::Decoration;

    #[test]
    fn test_line_gap_keeps_leading() {
        let ctx = TypesetContext::default();
        let gap = line_gap(&ctx, Length::pt(2.0), Length::pt(7.0));
        assert_eq!(gap, Length::pt(3.0));
    }

    #[test]
    fn test_line_gap_respects_minimum() {
        let ctx = TypesetContext::default();
        let gap = line_gap(&ctx, Length::pt(4.0), Length::pt(9.0));
        assert_eq!(gap, ctx.min_gap_of_lines);
    }

    #[test]
    fn test_vert_fixed_extent() {
        let margin = VertBox::TopMargin { breakable: true, length: Length::pt(4.0) };
        assert_eq!(margin.fixed_extent(), Some(Length::pt(4.0)));
        assert!(margin.is_margin());

        let paragraph = VertBox::Paragraph {
            ctx: Arc::new(TypesetContext::default()),
            boxes: EcoVec::new(),
        };
        assert_eq!(paragraph.fixed_extent(), None);
        assert!(!paragraph.is_margin());
    }

    #[test]
    fn test_intermediate_extent() {
        let fonts = StubFonts::default();
        let rule = PureHorzBox::FixedGraphics {
            width: Length::pt(3.0),
            height: Length::pt(8.0),
            depth: Length::pt(2.0),
            graphics: crate::visualize::Graphics::new(|_| vec![]),
        };
        let boxes = [rule.into()].into_iter().collect();
        let line = CommittedLine::new(boxes, Length::pt(3.0), &fonts)
            .and_then(|line| line.into_intermediate(&fonts))
            .unwrap();
        assert_eq!(line.extent(), Length::pt(10.0));

        let frame = IntermediateVertBox::Frame {
            paddings: Paddings::splat(Length::pt(1.5)),
            decorations: FrameDecorations::uniform(Decoration::empty()),
            part: FramePart::Whole,
            width: Length::pt(100.0),
            boxes: [line, IntermediateVertBox::FixedBreakable(Length::pt(4.0))]
                .into_iter()
                .collect(),
        };
        assert_eq!(frame.extent(), Length::pt(17.0));
    }
}
