use ecow::EcoVec;
use quire_library::layout::{HorzBox, Length, PureHorzBox, Stretchable};
use quire_library::math::{MathContext, MathKind};
use quire_library::text::FontResolver;

use super::ctx::Atoms;
use super::{Atom, kern};

/// The space between two atoms.
///
/// See the TeXbook p. 170.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum MathSpace {
    /// 3mu, never adjusted.
    Thin,
    /// 4mu, shrinking by 4mu and stretching by 2mu.
    Medium,
    /// 5mu, stretching by 5mu.
    Thick,
}

impl MathSpace {
    fn to_box(self, mu: Length) -> HorzBox {
        let glue = |natural: f64, shrink: f64, stretch: f64| {
            PureHorzBox::OuterEmpty {
                natural: mu * natural,
                shrinkable: mu * shrink,
                stretchable: Stretchable::Finite(mu * stretch),
            }
            .into()
        };
        match self {
            Self::Thin => kern(mu * 3.0),
            Self::Medium => glue(4.0, 4.0, 2.0),
            Self::Thick => glue(5.0, 0.0, 5.0),
        }
    }
}

/// Join atoms into boxes, with spacing between them.
pub fn join(mut atoms: Atoms, mctx: &MathContext, fonts: &dyn FontResolver) -> EcoVec<HorzBox> {
    demote_binaries(&mut atoms);

    let mu = mctx.actual_font_size(fonts) / 18.0;
    let base = mctx.is_in_base_level();
    let mut boxes = EcoVec::new();
    let mut last = None;
    for atom in atoms {
        if let Some(l) = last
            && let Some(space) = spacing(l, atom.left, base)
        {
            boxes.push(space.to_box(mu));
        }
        last = Some(atom.right);
        boxes.extend(atom.into_boxes());
    }
    boxes
}

/// Turn binary operators without operands on both sides into ordinary
/// atoms.
///
/// See rules 5, 6 and 19 of the TeXbook's Appendix G.
fn demote_binaries(atoms: &mut [Atom]) {
    use MathKind::*;

    let mut last: Option<MathKind> = None;
    for i in 0..atoms.len() {
        if atoms[i].left == Binary
            && matches!(last, None | Some(Binary | Operator | Relation | Open | Punct | Prefix))
        {
            atoms[i].demote();
        }

        if i > 0
            && atoms[i - 1].right == Binary
            && matches!(atoms[i].left, Relation | Close | Punct | End)
        {
            atoms[i - 1].demote();
        }

        last = Some(atoms[i].right);
    }

    if let Some(atom) = atoms.last_mut()
        && atom.right == Binary
    {
        atom.demote();
    }
}

/// The space between an atom whose right edge is `l` and one whose left
/// edge is `r`.
///
/// Everything but some thin spaces is dropped outside the base level.
fn spacing(l: MathKind, r: MathKind, base: bool) -> Option<MathSpace> {
    use MathKind::*;
    use MathSpace::*;

    // A prefix operator is spaced like an ordinary atom from the left and
    // binds to what follows it.
    if matches!(l, Prefix | End) || r == End {
        return None;
    }
    let r = if r == Prefix { Ordinary } else { r };

    let (space, in_scripts) = match (l, r) {
        (Ordinary | Close | Inner, Operator) => (Thin, true),
        (Operator, Ordinary | Operator) => (Thin, true),

        (Ordinary | Operator | Close, Inner) => (Thin, false),
        (Inner, Ordinary | Open | Punct | Inner) => (Thin, false),
        (Punct, Ordinary | Operator | Relation | Open | Close | Punct | Inner) => {
            (Thin, false)
        }

        (Ordinary | Close | Inner, Binary) => (Medium, false),
        (Binary, Ordinary | Operator | Open | Inner) => (Medium, false),

        (Ordinary | Operator | Close | Inner, Relation) => (Thick, false),
        (Relation, Ordinary | Operator | Open | Inner) => (Thick, false),

        _ => return None,
    };

    (base || in_scripts).then_some(space)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_table() {
        use MathKind::*;
        use MathSpace::*;

        assert_eq!(spacing(Ordinary, Ordinary, true), None);
        assert_eq!(spacing(Ordinary, Operator, true), Some(Thin));
        assert_eq!(spacing(Ordinary, Operator, false), Some(Thin));
        assert_eq!(spacing(Operator, Operator, false), Some(Thin));
        assert_eq!(spacing(Ordinary, Binary, true), Some(Medium));
        assert_eq!(spacing(Ordinary, Binary, false), None);
        assert_eq!(spacing(Relation, Relation, true), None);
        assert_eq!(spacing(Relation, Open, true), Some(Thick));
        assert_eq!(spacing(Open, Ordinary, true), None);
        assert_eq!(spacing(Ordinary, Close, true), None);
        assert_eq!(spacing(Punct, Ordinary, true), Some(Thin));
        assert_eq!(spacing(Punct, Ordinary, false), None);
        assert_eq!(spacing(Inner, Inner, true), Some(Thin));
        assert_eq!(spacing(Operator, Open, true), None);
    }

    #[test]
    fn test_spacing_prefix_and_end() {
        use MathKind::*;

        assert_eq!(spacing(Binary, Prefix, true), Some(MathSpace::Medium));
        assert_eq!(spacing(Prefix, Ordinary, true), None);
        assert_eq!(spacing(Prefix, Relation, true), None);
        assert_eq!(spacing(Relation, End, true), None);
        assert_eq!(spacing(End, Ordinary, true), None);
    }

    #[test]
    fn test_demote_before_closing() {
        use MathKind::*;

        let atom = |kind| Atom::new(kind, EcoVec::<HorzBox>::new());
        let mut atoms = [atom(Open), atom(Ordinary), atom(Binary), atom(Close)];
        demote_binaries(&mut atoms);
        assert_eq!(atoms[2].left, Ordinary);
        assert_eq!(atoms[2].right, Ordinary);
    }
}
