use ecow::EcoVec;
use quire_library::diag::StrResult;
use quire_library::layout::{Length, Point, PureHorzBox};
use quire_library::math::{Math, MathContext, MathKind};
use quire_library::visualize::Graphics;

use super::{Atom, LowerContext, kern, push_centered, rigid, rising};

/// Lays out a fraction.
///
/// Numerator and denominator are centered over each other and kept clear
/// of the bar on the math axis. At base level they are set at the same
/// level as the fraction, elsewhere one level deeper.
pub fn layout_frac(
    num: &[Math],
    denom: &[Math],
    ctx: &mut LowerContext,
    mctx: &MathContext,
) -> StrResult<()> {
    let inner = if mctx.is_in_base_level() { mctx.clone() } else { mctx.enter_script() };
    let (num, num_m) = ctx.layout_measured(num, &inner)?;
    let (denom, denom_m) = ctx.layout_measured(denom, &inner)?;

    let constants = mctx.constants(ctx.fonts);
    let size = mctx.actual_font_size(ctx.fonts);
    let axis = size * constants.axis_height;
    let thickness = size * constants.fraction_rule_thickness;
    let gap_min = size * constants.fraction_gap_min;

    let mut shift_up = size * constants.fraction_numerator_shift_up;
    let gap = (shift_up - num_m.depth) - (axis + thickness / 2.0);
    if gap < gap_min {
        shift_up += gap_min - gap;
    }

    let mut shift_down = size * constants.fraction_denominator_shift_down;
    let gap = (axis - thickness / 2.0) - (denom_m.height - shift_down);
    if gap < gap_min {
        shift_down += gap_min - gap;
    }

    let num_width = num_m.width.natural;
    let denom_width = denom_m.width.natural;
    let width = num_width.max(denom_width);
    let bar_bottom = axis - thickness / 2.0;
    let bar = PureHorzBox::FixedGraphics {
        width: Length::zero(),
        height: bar_bottom + thickness,
        depth: -bar_bottom,
        graphics: Graphics::rule(Point::with_y(bar_bottom), width, thickness, mctx.color()),
    };

    let mut boxes = EcoVec::new();
    boxes.push(bar.into());
    push_centered(&mut boxes, [rising(shift_up, [rigid(num)])], num_width, width);
    boxes.push(kern(-width));
    push_centered(&mut boxes, [rising(-shift_down, [rigid(denom)])], denom_width, width);

    ctx.push(Atom::new(MathKind::Inner, boxes));
    Ok(())
}
