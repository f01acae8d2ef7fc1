use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use ecow::{EcoVec, eco_format};

use crate::layout::{HorzBox, Length, Point, PureHorzBox};
use crate::visualize::{Color, Graphics, Operation};

/// How far a script attached to a delimiter moves horizontally, depending
/// on the vertical position of the script.
///
/// A negative result pulls the script towards the delimiter.
#[derive(Clone)]
pub struct Kerning(Arc<dyn Fn(Length) -> Length + Send + Sync>);

impl Kerning {
    /// Wrap a kerning function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Length) -> Length + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// No kerning at any height.
    pub fn none() -> Self {
        Self::new(|_| Length::zero())
    }

    /// The kern for a script whose baseline is `shift` above the baseline.
    pub fn apply(&self, shift: Length) -> Length {
        (self.0)(shift)
    }
}

impl Debug for Kerning {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad("Kerning(..)")
    }
}

/// Builds a delimiter that encloses content of a given extent.
///
/// Called with the height and depth of the enclosed content, the height of
/// the math axis, the font size and the color. Returns the boxes of the
/// delimiter and how scripts attached to it are kerned.
#[derive(Clone)]
pub struct Paren(
    Arc<dyn Fn(Length, Length, Length, Length, Color) -> (EcoVec<HorzBox>, Kerning) + Send + Sync>,
);

impl Paren {
    /// Wrap a delimiter builder.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Length, Length, Length, Length, Color) -> (EcoVec<HorzBox>, Kerning)
            + Send
            + Sync
            + 'static,
    {
        Self(Arc::new(f))
    }

    /// Build the delimiter for enclosed content.
    pub fn build(
        &self,
        height: Length,
        depth: Length,
        axis_height: Length,
        font_size: Length,
        color: Color,
    ) -> (EcoVec<HorzBox>, Kerning) {
        (self.0)(height, depth, axis_height, font_size, color)
    }

    /// A delimiter that draws nothing and takes no space.
    pub fn empty() -> Self {
        Self::new(|_, _, _, _, _| (EcoVec::new(), Kerning::none()))
    }

    /// A vertical bar centered on the math axis, tall enough to cover the
    /// content on both sides of the axis.
    pub fn bar() -> Self {
        Self::new(|height, depth, axis_height, font_size, color| {
            let half = (height - axis_height).max(depth + axis_height);
            let thickness = font_size * 0.05;
            let side = font_size * 0.1;
            let rule = Graphics::new(move |pos| {
                let bottom = Point::new(pos.x + side, pos.y + axis_height - half);
                vec![
                    Operation::new("q"),
                    color.fill_operation(),
                    Operation::new(eco_format!(
                        "{} {} {} {} re",
                        bottom.x.to_pt(),
                        bottom.y.to_pt(),
                        thickness.to_pt(),
                        (half * 2.0).to_pt(),
                    )),
                    Operation::new("f"),
                    Operation::new("Q"),
                ]
            });
            let boxes = [HorzBox::Pure(PureHorzBox::FixedGraphics {
                width: thickness + side * 2.0,
                height: axis_height + half,
                depth: half - axis_height,
                graphics: rule,
            })];
            (boxes.into_iter().collect(), Kerning::none())
        })
    }
}

impl Debug for Paren {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad("Paren(..)")
    }
}

/// Builds the sign of a radical.
///
/// Called with the height of the bottom of the bar, the bar's thickness, the
/// depth of the radicand, the font size and the color. The bar itself is
/// not part of the sign.
#[derive(Clone)]
pub struct Radical(
    Arc<dyn Fn(Length, Length, Length, Length, Color) -> EcoVec<HorzBox> + Send + Sync>,
);

impl Radical {
    /// Wrap a radical builder.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Length, Length, Length, Length, Color) -> EcoVec<HorzBox> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Build the sign for a radicand.
    pub fn build(
        &self,
        bar_height: Length,
        bar_thickness: Length,
        depth: Length,
        font_size: Length,
        color: Color,
    ) -> EcoVec<HorzBox> {
        (self.0)(bar_height, bar_thickness, depth, font_size, color)
    }

    /// A stroked check mark meeting the bar at its left end.
    pub fn stroke() -> Self {
        Self::new(|bar_height, bar_thickness, depth, font_size, color| {
            let width = font_size * 0.6;
            let sign = Graphics::new(move |pos| {
                let top = pos.y + bar_height + bar_thickness / 2.0;
                let mid = pos.y + bar_height * 0.4;
                let bottom = pos.y - depth;
                vec![
                    Operation::new("q"),
                    color.stroke_operation(),
                    Operation::new(eco_format!("{} w", bar_thickness.to_pt())),
                    Operation::new(eco_format!("{} {} m", pos.x.to_pt(), mid.to_pt())),
                    Operation::new(eco_format!(
                        "{} {} l",
                        (pos.x + width * 0.3).to_pt(),
                        bottom.to_pt(),
                    )),
                    Operation::new(eco_format!(
                        "{} {} l",
                        (pos.x + width).to_pt(),
                        top.to_pt(),
                    )),
                    Operation::new("S"),
                    Operation::new("Q"),
                ]
            });
            let boxes = [HorzBox::Pure(PureHorzBox::FixedGraphics {
                width,
                height: bar_height + bar_thickness,
                depth,
                graphics: sign,
            })];
            boxes.into_iter().collect()
        })
    }
}

impl Debug for Radical {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad("Radical(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measure;
    use crate::text::testing::StubFonts;

    #[test]
    fn test_bar_covers_both_sides_of_axis() {
        let fonts = StubFonts::default();
        let (boxes, kerning) = Paren::bar().build(
            Length::pt(8.0),
            Length::pt(1.0),
            Length::pt(2.5),
            Length::pt(10.0),
            Color::BLACK,
        );
        let m = measure(&boxes, &fonts).unwrap();
        assert_eq!(m.height, Length::pt(8.0));
        assert_eq!(m.depth, Length::pt(3.0));
        assert_eq!(m.width.natural, Length::pt(2.5));
        assert_eq!(kerning.apply(Length::pt(4.0)), Length::zero());
    }

    #[test]
    fn test_empty_paren() {
        let (boxes, _) = Paren::empty().build(
            Length::pt(8.0),
            Length::pt(1.0),
            Length::pt(2.5),
            Length::pt(10.0),
            Color::BLACK,
        );
        assert!(boxes.is_empty());
    }

    #[test]
    fn test_radical_sign_reaches_bar() {
        let fonts = StubFonts::default();
        let boxes = Radical::stroke().build(
            Length::pt(9.0),
            Length::pt(0.5),
            Length::pt(2.0),
            Length::pt(10.0),
            Color::BLACK,
        );
        let m = measure(&boxes, &fonts).unwrap();
        assert_eq!(m.height, Length::pt(9.5));
        assert_eq!(m.depth, Length::pt(2.0));
        assert_eq!(m.width.natural, Length::pt(6.0));
    }

    #[test]
    fn test_kerning_depends_on_shift() {
        let kerning = Kerning::new(|shift| -(shift / 10.0));
        assert_eq!(kerning.apply(Length::pt(5.0)), Length::pt(-0.5));
    }
}
