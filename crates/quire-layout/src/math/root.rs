use ecow::EcoVec;
use quire_library::diag::StrResult;
use quire_library::layout::{Length, Point, PureHorzBox};
use quire_library::math::{Math, MathContext, MathKind, Radical};
use quire_library::visualize::Graphics;

use super::{Atom, LowerContext, kern, rigid, rising};

/// Lays out a radical with an optional index.
///
/// The sign comes from the radical builder; the bar over the radicand is
/// drawn here. The index is set two levels deeper and raised to sit in the
/// crook of the sign.
pub fn layout_root(
    radical: &Radical,
    index: Option<&[Math]>,
    body: &[Math],
    ctx: &mut LowerContext,
    mctx: &MathContext,
) -> StrResult<()> {
    let (body, body_m) = ctx.layout_measured(body, mctx)?;

    let constants = mctx.constants(ctx.fonts);
    let size = mctx.actual_font_size(ctx.fonts);
    let thickness = size * constants.radical_rule_thickness;
    let gap = size * constants.radical_vertical_gap;
    let bar_height = body_m.height + gap;

    let sign = radical.build(bar_height, thickness, body_m.depth, size, mctx.color());
    let bar = PureHorzBox::FixedGraphics {
        width: Length::zero(),
        height: bar_height + thickness,
        depth: Length::zero(),
        graphics: Graphics::rule(
            Point::with_y(bar_height),
            body_m.width.natural,
            thickness,
            mctx.color(),
        ),
    };

    let mut boxes = EcoVec::new();
    if let Some(index) = index {
        let script_script = mctx.enter_script().enter_script();
        let (index, index_m) = ctx.layout_measured(index, &script_script)?;
        let sign_m = ctx.measure(&sign)?;
        let raise = (sign_m.height + sign_m.depth) * constants.radical_degree_bottom_raise;
        let before = size * constants.radical_kern_before_degree;
        let after =
            (size * constants.radical_kern_after_degree).max(-(before + index_m.width.natural));
        boxes.push(kern(before));
        boxes.push(rising(raise - sign_m.depth, [rigid(index)]));
        boxes.push(kern(after));
    }
    boxes.extend(sign);
    boxes.push(bar.into());
    boxes.push(rigid(body));

    ctx.push(Atom::new(MathKind::Ordinary, boxes));
    Ok(())
}

#[cfg(test)]
mod tests {
    use quire_library::layout::{EvaluatedHorzBoxMain, HorzBox, measure};
    use quire_library::text::testing::StubFonts;
    use quire_library::visualize::Color;
    use quire_utils::assert_approx_eq;

    use super::*;
    use crate::lower;
    use crate::math::justify;

    fn context() -> MathContext {
        MathContext::new("math", Length::pt(10.0), Color::BLACK)
    }

    #[test]
    fn test_radical_sign_gets_bar_height() {
        let fonts = StubFonts::default();
        let heights = std::sync::Arc::new(std::sync::Mutex::new(vec![]));
        let seen = heights.clone();
        let radical = Radical::new(move |bar_height, thickness, depth, _, _| {
            if let Ok(mut seen) = seen.lock() {
                seen.push((bar_height, thickness, depth));
            }
            EcoVec::new()
        });
        let math = [Math::Radical { radical, body: Math::text("x") }];
        lower(&context(), &math, &fonts).unwrap();

        let seen = heights.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (bar_height, thickness, depth) = seen[0];
        assert_approx_eq!(bar_height, 7.0 + 0.5);
        assert_approx_eq!(thickness, 0.4);
        assert_approx_eq!(depth, 2.0);
    }

    #[test]
    fn test_radical_measures_sign_and_body() {
        let fonts = StubFonts::default();
        let math = [Math::Radical { radical: Radical::stroke(), body: Math::text("x") }];
        let boxes = lower(&context(), &math, &fonts).unwrap();
        let m = measure(&boxes, &fonts).unwrap();
        assert_approx_eq!(m.width.natural, 6.0 + 5.0);
        assert_approx_eq!(m.height, 7.5 + 0.4);
    }

    #[test]
    fn test_radicand_stays_under_bar_in_justified_line() {
        let fonts = StubFonts::default();
        let ctx = MathContext::new("math", Length::pt(18.0), Color::BLACK);
        let math = [Math::Radical { radical: Radical::stroke(), body: Math::text("a+b") }];
        let boxes = lower(&ctx, &math, &fonts).unwrap();
        let placed = justify(&boxes, Length::pt(10.0), &fonts);

        let bodies: Vec<_> = placed
            .iter()
            .filter(|(_, b)| matches!(b.main(), EvaluatedHorzBoxMain::Frame { .. }))
            .collect();
        assert_eq!(bodies.len(), 1);
        let (x, body) = bodies[0];
        // The sign is 10.8pt wide and the bar starts where it ends.
        assert_approx_eq!(*x, 10.8);
        assert_approx_eq!(body.width(), 35.0);
        let total: Length = placed.iter().map(|(_, b)| b.width()).sum();
        assert_approx_eq!(total, 10.8 + 35.0);
    }

    #[test]
    fn test_radical_index_is_raised() {
        let fonts = StubFonts::default();
        let math = [Math::RadicalWithIndex {
            radical: Radical::stroke(),
            index: Math::text("3"),
            body: Math::text("x"),
        }];
        let boxes = lower(&context(), &math, &fonts).unwrap();
        let HorzBox::Pure(PureHorzBox::Rising { rising, boxes: index }) = &boxes[1] else {
            panic!("expected the raised index");
        };
        // The sign spans 7.9pt above and 2pt below the baseline.
        assert_approx_eq!(*rising, 9.9 * 0.6 - 2.0);

        let HorzBox::Pure(PureHorzBox::InnerFrame { boxes: index, .. }) = &index[0] else {
            panic!("expected the index held at its natural width");
        };
        let HorzBox::Pure(PureHorzBox::InnerMathGlyph { info, .. }) = &index[0] else {
            panic!("expected a glyph");
        };
        assert_eq!(info.size, Length::pt(5.0));

        // The index is 2.5pt wide, so the kern after it is limited.
        let m = measure(&boxes, &fonts).unwrap();
        assert_approx_eq!(m.width.natural, 6.0 + 5.0);
    }
}
