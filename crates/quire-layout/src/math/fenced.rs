use quire_library::diag::StrResult;
use quire_library::layout::Length;
use quire_library::math::{MathContext, MathKind, MathList, Paren};

use super::{Atom, LowerContext};

/// Lays out parts between delimiters, with a middle delimiter between
/// consecutive parts.
///
/// All delimiters are built for the tallest and deepest part. Scripts
/// attached to the result are kerned by the closing delimiter.
pub fn layout_fenced(
    left: &Paren,
    middle: Option<&Paren>,
    right: &Paren,
    parts: &[MathList],
    ctx: &mut LowerContext,
    mctx: &MathContext,
) -> StrResult<()> {
    let mut laid_out = Vec::with_capacity(parts.len());
    let mut height = Length::zero();
    let mut depth = Length::zero();
    for part in parts {
        let (boxes, m) = ctx.layout_measured(part, mctx)?;
        height.set_max(m.height);
        depth.set_max(m.depth);
        laid_out.push(boxes);
    }

    let size = mctx.actual_font_size(ctx.fonts);
    let axis = size * mctx.constants(ctx.fonts).axis_height;
    let build = |paren: &Paren| paren.build(height, depth, axis, size, mctx.color());

    let (mut boxes, _) = build(left);
    for (i, part) in laid_out.into_iter().enumerate() {
        if i > 0
            && let Some(middle) = middle
        {
            boxes.extend(build(middle).0);
        }
        boxes.extend(part);
    }
    let (closing, kerning) = build(right);
    boxes.extend(closing);

    ctx.push(Atom::new(MathKind::Inner, boxes).with_kerning(kerning));
    Ok(())
}
