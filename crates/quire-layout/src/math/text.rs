use ecow::eco_format;
use quire_library::diag::{OkOr, StrResult};
use quire_library::layout::{HorzBox, Length, PureHorzBox};
use quire_library::math::{MathContext, MathElement, MathElementMain};

use super::{Atom, LowerContext};

/// Lays out a [`MathElement`].
pub fn layout_element(
    elem: &MathElement,
    ctx: &mut LowerContext,
    mctx: &MathContext,
) -> StrResult<()> {
    let atom = match &elem.main {
        MathElementMain::Char(c) => {
            let (glyph, italic) = layout_glyph(*c, ctx, mctx)?;
            Atom::new(elem.kind, [glyph]).with_italic(italic)
        }
        MathElementMain::Embedded(embedded) => Atom::new(elem.kind, embedded.build(mctx)),
    };
    ctx.push(atom);
    Ok(())
}

/// Set a character in the math font at the context's size. Also returns the
/// glyph's italic correction.
fn layout_glyph(
    c: char,
    ctx: &LowerContext,
    mctx: &MathContext,
) -> StrResult<(HorzBox, Length)> {
    let info = mctx.string_info(ctx.fonts);
    let glyph = ctx
        .fonts
        .math_glyph(&info.font, info.size, c)
        .ok_or_msg(|| eco_format!("math font {} has no glyph for {c:?}", info.font))?;
    let glyph_box = PureHorzBox::InnerMathGlyph {
        info,
        width: glyph.width,
        height: glyph.height,
        depth: glyph.depth,
        glyph: glyph.id,
    };
    Ok((glyph_box.into(), glyph.italic_correction))
}
