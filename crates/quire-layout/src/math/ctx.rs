use ecow::EcoVec;
use quire_library::diag::StrResult;
use quire_library::layout::{HorzBox, Metrics, measure};
use quire_library::math::{Math, MathContext, MathKind};
use quire_library::text::FontResolver;
use smallvec::SmallVec;

use super::{Atom, attach, fenced, frac, root, spacing, text};

/// The atoms of a math list, before spacing is inserted.
pub type Atoms = SmallVec<[Atom; 8]>;

/// The state of lowering math into boxes.
pub struct LowerContext<'a> {
    pub fonts: &'a dyn FontResolver,
    pub atoms: Atoms,
}

impl<'a> LowerContext<'a> {
    /// Create a new lowering context.
    pub fn new(fonts: &'a dyn FontResolver) -> Self {
        Self { fonts, atoms: SmallVec::new() }
    }

    /// Push an atom.
    pub fn push(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    /// Lay out a list and return its atoms, leaving the atoms held by this
    /// context untouched.
    pub fn layout_into_atoms(&mut self, list: &[Math], mctx: &MathContext) -> StrResult<Atoms> {
        let prev = std::mem::take(&mut self.atoms);
        for node in list {
            self.layout_node(node, mctx)?;
        }
        Ok(std::mem::replace(&mut self.atoms, prev))
    }

    /// Lay out a list as a single atom.
    ///
    /// A list of one node keeps that node's atom, so that kinds, italic
    /// correction and kerning survive grouping.
    pub fn layout_into_atom(&mut self, list: &[Math], mctx: &MathContext) -> StrResult<Atom> {
        let mut atoms = self.layout_into_atoms(list, mctx)?;
        if atoms.len() == 1
            && let Some(atom) = atoms.pop()
        {
            return Ok(atom);
        }

        let left = atoms.first().map_or(MathKind::Ordinary, |atom| atom.left);
        let right = atoms.last().map_or(MathKind::Ordinary, |atom| atom.right);
        Ok(Atom::with_edges(left, right, spacing::join(atoms, mctx, self.fonts)))
    }

    /// Lay out a list into spaced boxes.
    pub fn layout_into_boxes(
        &mut self,
        list: &[Math],
        mctx: &MathContext,
    ) -> StrResult<EcoVec<HorzBox>> {
        let atoms = self.layout_into_atoms(list, mctx)?;
        Ok(spacing::join(atoms, mctx, self.fonts))
    }

    /// Lay out a list into spaced boxes and measure them.
    pub fn layout_measured(
        &mut self,
        list: &[Math],
        mctx: &MathContext,
    ) -> StrResult<(EcoVec<HorzBox>, Metrics)> {
        let boxes = self.layout_into_boxes(list, mctx)?;
        let metrics = self.measure(&boxes)?;
        Ok((boxes, metrics))
    }

    /// Measure boxes with this context's fonts.
    pub fn measure(&self, boxes: &[HorzBox]) -> StrResult<Metrics> {
        measure(boxes, self.fonts)
    }

    fn layout_node(&mut self, node: &Math, mctx: &MathContext) -> StrResult<()> {
        match node {
            Math::Pure(elem) => text::layout_element(elem, self, mctx),
            Math::Group { left, right, body } => {
                let boxes = self.layout_into_boxes(body, mctx)?;
                self.push(Atom::with_edges(*left, *right, boxes));
                Ok(())
            }
            Math::Subscript { base, sub } => {
                attach::layout_scripts(base, Some(sub), None, self, mctx)
            }
            Math::Superscript { base, sup } => {
                attach::layout_scripts(base, None, Some(sup), self, mctx)
            }
            Math::SubSuperscript { base, sub, sup } => {
                attach::layout_scripts(base, Some(sub), Some(sup), self, mctx)
            }
            Math::Fraction { num, denom } => frac::layout_frac(num, denom, self, mctx),
            Math::Radical { radical, body } => {
                root::layout_root(radical, None, body, self, mctx)
            }
            Math::RadicalWithIndex { radical, index, body } => {
                root::layout_root(radical, Some(index), body, self, mctx)
            }
            Math::Paren { left, right, body } => {
                fenced::layout_fenced(left, None, right, std::slice::from_ref(body), self, mctx)
            }
            Math::ParenWithMiddle { left, middle, right, parts } => {
                fenced::layout_fenced(left, Some(middle), right, parts, self, mctx)
            }
            Math::UpperLimit { base, upper } => {
                attach::layout_limit(base, upper, true, self, mctx)
            }
            Math::LowerLimit { base, lower } => {
                attach::layout_limit(base, lower, false, self, mctx)
            }
        }
    }
}
