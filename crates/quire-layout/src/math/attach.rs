use ecow::EcoVec;
use quire_library::diag::StrResult;
use quire_library::layout::{HorzBox, Length, Metrics};
use quire_library::math::{Math, MathContext};

use super::{Atom, LowerContext, kern, push_centered, rigid, rising};

/// Lays out a base with a subscript, a superscript or both.
///
/// Scripts are set one level deeper and shifted by the font's script
/// constants. The result keeps the kinds of the base.
pub fn layout_scripts(
    base: &[Math],
    sub: Option<&[Math]>,
    sup: Option<&[Math]>,
    ctx: &mut LowerContext,
    mctx: &MathContext,
) -> StrResult<()> {
    let base = ctx.layout_into_atom(base, mctx)?;
    let script = mctx.enter_script();
    let sub = sub.map(|list| ctx.layout_measured(list, &script)).transpose()?;
    let sup = sup.map(|list| ctx.layout_measured(list, &script)).transpose()?;

    let constants = mctx.constants(ctx.fonts);
    let size = mctx.actual_font_size(ctx.fonts);
    let sup_shift = |m: &Metrics| {
        (size * constants.superscript_shift_up)
            .max(m.depth + size * constants.superscript_bottom_min)
    };
    let sub_shift = |m: &Metrics| {
        (size * constants.subscript_shift_down)
            .max(m.height - size * constants.subscript_top_max)
    };
    let kerning = |shift: Length| {
        base.kerning.as_ref().map_or(Length::zero(), |kerning| kerning.apply(shift))
    };

    let mut boxes = base.boxes.clone();
    match (sup, sub) {
        (Some((sup, sup_m)), None) => {
            let shift = sup_shift(&sup_m);
            push_kern(&mut boxes, base.italic + kerning(shift));
            boxes.push(rising(shift, sup));
        }
        (None, Some((sub, sub_m))) => {
            let shift = sub_shift(&sub_m);
            push_kern(&mut boxes, kerning(-shift));
            boxes.push(rising(-shift, sub));
        }
        (Some((sup, sup_m)), Some((sub, sub_m))) => {
            let up = sup_shift(&sup_m);
            let mut down = sub_shift(&sub_m);
            let gap = (up - sup_m.depth) - (sub_m.height - down);
            let gap_min = size * constants.sub_superscript_gap_min;
            if gap < gap_min {
                down += gap_min - gap;
            }

            let sup_kern = base.italic + kerning(up);
            let sub_kern = kerning(-down);
            let sup_width = sup_kern + sup_m.width.natural;
            let sub_width = sub_kern + sub_m.width.natural;

            boxes.push(rising(up, [kern(sup_kern), rigid(sup)]));
            boxes.push(kern(-sup_width));
            boxes.push(rising(-down, [kern(sub_kern), rigid(sub)]));
            push_kern(&mut boxes, sup_width.max(sub_width) - sub_width);
        }
        (None, None) => push_kern(&mut boxes, base.italic),
    }

    ctx.push(Atom::with_edges(base.left, base.right, boxes));
    Ok(())
}

/// Lays out a limit above or below a base.
///
/// At base level, the limit is stacked centered over or under the base.
/// Elsewhere it is attached as a script.
pub fn layout_limit(
    base: &[Math],
    limit: &[Math],
    upper: bool,
    ctx: &mut LowerContext,
    mctx: &MathContext,
) -> StrResult<()> {
    if !mctx.is_in_base_level() {
        return if upper {
            layout_scripts(base, None, Some(limit), ctx, mctx)
        } else {
            layout_scripts(base, Some(limit), None, ctx, mctx)
        };
    }

    let base = ctx.layout_into_atom(base, mctx)?;
    let (left, right) = (base.left, base.right);
    let base = base.into_boxes();
    let base_m = ctx.measure(&base)?;
    let (limit, limit_m) = ctx.layout_measured(limit, &mctx.enter_script())?;

    let constants = mctx.constants(ctx.fonts);
    let size = mctx.actual_font_size(ctx.fonts);
    let shift = if upper {
        base_m.height + size * constants.upper_limit_gap_min + limit_m.depth
    } else {
        -(base_m.depth + size * constants.lower_limit_gap_min + limit_m.height)
    };

    let base_width = base_m.width.natural;
    let limit_width = limit_m.width.natural;
    let width = base_width.max(limit_width);

    let mut boxes = EcoVec::new();
    push_centered(&mut boxes, [rigid(base)], base_width, width);
    boxes.push(kern(-width));
    push_centered(&mut boxes, [rising(shift, [rigid(limit)])], limit_width, width);

    ctx.push(Atom::with_edges(left, right, boxes));
    Ok(())
}

fn push_kern(boxes: &mut EcoVec<HorzBox>, amount: Length) {
    if amount != Length::zero() {
        boxes.push(kern(amount));
    }
}
