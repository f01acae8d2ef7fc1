use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use ecow::eco_format;

use super::{Color, Operation};
use crate::layout::{FramePart, Length, Point};

/// Draws the border and background of a box once its geometry is known.
///
/// Called with the anchor point on the baseline at the left edge, the width,
/// the height above and the depth below the baseline. Decorations must be
/// pure: the same geometry always yields the same operations.
#[derive(Clone)]
pub struct Decoration(Arc<dyn Fn(Point, Length, Length, Length) -> Vec<Operation> + Send + Sync>);

impl Decoration {
    /// Wrap a drawing function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Point, Length, Length, Length) -> Vec<Operation> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// A decoration that draws nothing.
    pub fn empty() -> Self {
        Self::new(|_, _, _, _| vec![])
    }

    /// A decoration that strokes the outline of the box.
    pub fn stroke(thickness: Length, color: Color) -> Self {
        Self::new(move |pos, width, height, depth| {
            let bottom = pos.y - depth;
            vec![
                Operation::new("q"),
                color.stroke_operation(),
                Operation::new(eco_format!("{} w", thickness.to_pt())),
                Operation::new(eco_format!(
                    "{} {} {} {} re",
                    pos.x.to_pt(),
                    bottom.to_pt(),
                    width.to_pt(),
                    (height + depth).to_pt(),
                )),
                Operation::new("S"),
                Operation::new("Q"),
            ]
        })
    }

    /// Produce the operations for the given geometry.
    pub fn draw(
        &self,
        pos: Point,
        width: Length,
        height: Length,
        depth: Length,
    ) -> Vec<Operation> {
        (self.0)(pos, width, height, depth)
    }
}

impl Debug for Decoration {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad("Decoration(..)")
    }
}

/// The decorations of a frame that a breaker may split.
///
/// Which one applies depends on the part of the frame a fragment is.
#[derive(Debug, Clone)]
pub struct FrameDecorations {
    /// For a frame that was not split.
    pub whole: Decoration,
    /// For the first fragment of a split frame.
    pub head: Decoration,
    /// For fragments between the first and the last.
    pub middle: Decoration,
    /// For the last fragment of a split frame.
    pub tail: Decoration,
}

impl FrameDecorations {
    /// Use the same decoration for every part.
    pub fn uniform(decoration: Decoration) -> Self {
        Self {
            whole: decoration.clone(),
            head: decoration.clone(),
            middle: decoration.clone(),
            tail: decoration,
        }
    }

    /// The decoration for a part of the frame.
    pub fn get(&self, part: FramePart) -> &Decoration {
        match part {
            FramePart::Whole => &self.whole,
            FramePart::Head => &self.head,
            FramePart::Middle => &self.middle,
            FramePart::Tail => &self.tail,
        }
    }
}

/// Inline graphics: drawing operations relative to an anchor point on the
/// baseline.
#[derive(Clone)]
pub struct Graphics(Arc<dyn Fn(Point) -> Vec<Operation> + Send + Sync>);

impl Graphics {
    /// Wrap a drawing function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Point) -> Vec<Operation> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// A filled rectangle with its bottom left corner `offset` away from the
    /// anchor point.
    pub fn rule(offset: Point, width: Length, thickness: Length, color: Color) -> Self {
        Self::new(move |pos| {
            let origin = pos + offset;
            vec![
                Operation::new("q"),
                color.fill_operation(),
                Operation::new(eco_format!(
                    "{} {} {} {} re",
                    origin.x.to_pt(),
                    origin.y.to_pt(),
                    width.to_pt(),
                    thickness.to_pt(),
                )),
                Operation::new("f"),
                Operation::new("Q"),
            ]
        })
    }

    /// Produce the operations for the given anchor point.
    pub fn draw(&self, pos: Point) -> Vec<Operation> {
        (self.0)(pos)
    }
}

impl Debug for Graphics {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad("Graphics(..)")
    }
}
