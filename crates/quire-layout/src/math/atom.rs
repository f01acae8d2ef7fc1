use ecow::EcoVec;
use quire_library::layout::{HorzBox, Length};
use quire_library::math::{Kerning, MathKind};

use super::kern;

/// A laid out math node together with the spacing classes of its edges.
#[derive(Debug, Clone)]
pub struct Atom {
    pub left: MathKind,
    pub right: MathKind,
    pub boxes: EcoVec<HorzBox>,
    /// The italic correction of a trailing glyph. Added after the atom
    /// unless a subscript is attached.
    pub italic: Length,
    /// How scripts attached to the atom are kerned.
    pub kerning: Option<Kerning>,
}

impl Atom {
    /// An atom of a single kind.
    pub fn new(kind: MathKind, boxes: impl IntoIterator<Item = HorzBox>) -> Self {
        Self::with_edges(kind, kind, boxes)
    }

    /// An atom whose edges are spaced differently.
    pub fn with_edges(
        left: MathKind,
        right: MathKind,
        boxes: impl IntoIterator<Item = HorzBox>,
    ) -> Self {
        Self {
            left,
            right,
            boxes: boxes.into_iter().collect(),
            italic: Length::zero(),
            kerning: None,
        }
    }

    pub fn with_italic(self, italic: Length) -> Self {
        Self { italic, ..self }
    }

    pub fn with_kerning(self, kerning: Kerning) -> Self {
        Self { kerning: Some(kerning), ..self }
    }

    /// Turn binary edges into ordinary ones.
    pub fn demote(&mut self) {
        for edge in [&mut self.left, &mut self.right] {
            if *edge == MathKind::Binary {
                *edge = MathKind::Ordinary;
            }
        }
    }

    /// The boxes of the atom, followed by its italic correction.
    pub fn into_boxes(self) -> EcoVec<HorzBox> {
        let mut boxes = self.boxes;
        if self.italic != Length::zero() {
            boxes.push(kern(self.italic));
        }
        boxes
    }
}
