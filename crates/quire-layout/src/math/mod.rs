//! Lowering of math into horizontal boxes.

mod atom;
mod attach;
mod ctx;
mod fenced;
mod frac;
mod root;
mod spacing;
mod text;

use ecow::EcoVec;
use quire_library::diag::StrResult;
use quire_library::layout::{HorzBox, Length, Paddings, PureHorzBox};
use quire_library::math::{Math, MathContext};
use quire_library::text::FontResolver;
use quire_library::visualize::Decoration;

use self::atom::Atom;
use self::ctx::LowerContext;

/// Lower a math expression into horizontal boxes.
///
/// Characters are set with glyphs from the context's math font, and glue
/// is inserted between elements according to their kinds. The result is
/// ordinary horizontal content that a line breaker can take.
pub fn lower(
    ctx: &MathContext,
    math: &[Math],
    fonts: &dyn FontResolver,
) -> StrResult<EcoVec<HorzBox>> {
    let mut lower = LowerContext::new(fonts);
    let boxes = lower.layout_into_boxes(math, ctx)?;
    log::trace!("lowered {} math nodes into {} boxes", math.len(), boxes.len());
    Ok(boxes)
}

/// Fixed horizontal space.
fn kern(amount: Length) -> HorzBox {
    PureHorzBox::FixedEmpty(amount).into()
}

/// Content with its baseline shifted up.
fn rising(shift: Length, boxes: impl IntoIterator<Item = HorzBox>) -> HorzBox {
    PureHorzBox::Rising { rising: shift, boxes: boxes.into_iter().collect() }.into()
}

/// Content held at its natural width, whatever the line's glue set is.
///
/// Parts that are positioned against each other with kerns must not stretch.
fn rigid(boxes: EcoVec<HorzBox>) -> HorzBox {
    PureHorzBox::InnerFrame {
        paddings: Paddings::zero(),
        decoration: Decoration::empty(),
        boxes,
    }
    .into()
}

/// Push content of the given width centered in `total`.
fn push_centered(
    out: &mut EcoVec<HorzBox>,
    boxes: impl IntoIterator<Item = HorzBox>,
    width: Length,
    total: Length,
) {
    let pad = (total - width) / 2.0;
    out.push(kern(pad));
    out.extend(boxes);
    out.push(kern(pad));
}

/// Commit lowered math into a line that is `extra` wider than its natural
/// width, with all of the extra space taken by glue in front of it. Returns
/// each evaluated box of the math with its position.
#[cfg(test)]
fn justify(
    boxes: &[HorzBox],
    extra: Length,
    fonts: &dyn FontResolver,
) -> Vec<(Length, quire_library::layout::EvaluatedHorzBox)> {
    use quire_library::layout::{CommittedLine, Stretchable, measure};

    let natural = measure(boxes, fonts).unwrap().width.natural;
    let mut line = EcoVec::new();
    line.push(HorzBox::from(PureHorzBox::OuterEmpty {
        natural: Length::zero(),
        shrinkable: Length::zero(),
        stretchable: Stretchable::Finite(extra),
    }));
    line.extend(boxes.iter().cloned());
    let line = CommittedLine::new(line, natural + extra, fonts).unwrap();

    let mut x = Length::zero();
    let mut placed = vec![];
    for evaluated in line.evaluate(fonts).unwrap().into_iter().skip(1) {
        let width = evaluated.width();
        placed.push((x, evaluated));
        x += width;
    }
    placed
}
