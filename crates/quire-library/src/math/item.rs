use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use ecow::EcoVec;

use super::{MathContext, MathKind, Paren, Radical};
use crate::layout::HorzBox;

/// A math expression: a list of nodes laid out side by side.
pub type MathList = EcoVec<Math>;

/// A node of a math expression.
#[derive(Debug, Clone)]
pub enum Math {
    /// A single element.
    Pure(MathElement),
    /// A subformula spaced as `left` on its left edge and `right` on its
    /// right edge.
    Group { left: MathKind, right: MathKind, body: MathList },
    Subscript { base: MathList, sub: MathList },
    Superscript { base: MathList, sup: MathList },
    /// A base with both a subscript and a superscript.
    SubSuperscript { base: MathList, sub: MathList, sup: MathList },
    Fraction { num: MathList, denom: MathList },
    Radical { radical: Radical, body: MathList },
    RadicalWithIndex { radical: Radical, index: MathList, body: MathList },
    /// Content between delimiters sized to fit it.
    Paren { left: Paren, right: Paren, body: MathList },
    /// Parts separated by a middle delimiter, all sized to the tallest part.
    ParenWithMiddle {
        left: Paren,
        middle: Paren,
        right: Paren,
        parts: EcoVec<MathList>,
    },
    /// Content stacked above the base in display style.
    UpperLimit { base: MathList, upper: MathList },
    /// Content stacked below the base in display style.
    LowerLimit { base: MathList, lower: MathList },
}

impl Math {
    /// A character with its default kind.
    pub fn char(c: char) -> Self {
        Self::char_with_kind(MathKind::of_char(c), c)
    }

    /// A character with an explicit kind.
    pub fn char_with_kind(kind: MathKind, c: char) -> Self {
        Self::Pure(MathElement::new(kind, MathElementMain::Char(c)))
    }

    /// Arbitrary horizontal content built for the context it ends up in.
    pub fn embedded(kind: MathKind, embedded: EmbeddedMath) -> Self {
        Self::Pure(MathElement::new(kind, MathElementMain::Embedded(embedded)))
    }

    /// One node per character of a string.
    pub fn text(text: &str) -> MathList {
        text.chars().map(Self::char).collect()
    }
}

/// A leaf of a math expression together with its spacing class.
#[derive(Debug, Clone)]
pub struct MathElement {
    pub kind: MathKind,
    pub main: MathElementMain,
}

impl MathElement {
    pub fn new(kind: MathKind, main: MathElementMain) -> Self {
        Self { kind, main }
    }
}

/// The content of a [`MathElement`].
#[derive(Debug, Clone)]
pub enum MathElementMain {
    /// A character set in the math font.
    Char(char),
    /// Non-math content inside a formula.
    Embedded(EmbeddedMath),
}

/// Produces horizontal content for the math context it is placed in.
#[derive(Clone)]
pub struct EmbeddedMath(Arc<dyn Fn(&MathContext) -> EcoVec<HorzBox> + Send + Sync>);

impl EmbeddedMath {
    /// Wrap a content builder.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&MathContext) -> EcoVec<HorzBox> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Build the content for a context.
    pub fn build(&self, ctx: &MathContext) -> EcoVec<HorzBox> {
        (self.0)(ctx)
    }
}

impl Debug for EmbeddedMath {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad("EmbeddedMath(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Length, PureHorzBox};
    use crate::visualize::Color;

    #[test]
    fn test_text_classifies_chars() {
        let list = Math::text("a+b");
        let kinds: Vec<_> = list
            .iter()
            .map(|m| match m {
                Math::Pure(elem) => elem.kind,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(kinds, [MathKind::Ordinary, MathKind::Binary, MathKind::Ordinary]);
    }

    #[test]
    fn test_embedded_sees_context() {
        let embedded = EmbeddedMath::new(|ctx| {
            let width = if ctx.is_in_base_level() { 10.0 } else { 5.0 };
            [PureHorzBox::FixedEmpty(Length::pt(width)).into()].into_iter().collect()
        });
        let base = MathContext::new("math", Length::pt(10.0), Color::BLACK);
        let widths: Vec<_> = [base.clone(), base.enter_script()]
            .iter()
            .map(|ctx| match embedded.build(ctx).first() {
                Some(HorzBox::Pure(PureHorzBox::FixedEmpty(w))) => w.to_pt(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(widths, [10.0, 5.0]);
    }
}
