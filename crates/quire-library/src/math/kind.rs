use unicode_math_class::MathClass;

/// The spacing class of a math element.
///
/// Which glue goes between two adjacent elements depends on the kind at the
/// right edge of the first and the kind at the left edge of the second.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MathKind {
    /// Letters, digits and most symbols.
    #[default]
    Ordinary,
    /// Binary operators like `+`.
    Binary,
    /// Relations like `=`.
    Relation,
    /// Large operators like `∑`.
    Operator,
    /// Punctuation like `,`.
    Punct,
    /// Opening delimiters.
    Open,
    /// Closing delimiters.
    Close,
    /// Prefix operators like unary minus. Spaced like an ordinary element
    /// on the left, with no space to the right.
    Prefix,
    /// Delimited subformulas.
    Inner,
    /// Marks the end of a formula. Never spaced.
    End,
}

impl MathKind {
    /// The default kind of a character.
    pub fn of_char(c: char) -> Self {
        unicode_math_class::class(c).map_or(Self::Ordinary, Self::from)
    }
}

impl From<MathClass> for MathKind {
    fn from(class: MathClass) -> Self {
        match class {
            MathClass::Binary | MathClass::Vary => Self::Binary,
            MathClass::Relation => Self::Relation,
            MathClass::Large => Self::Operator,
            MathClass::Punctuation => Self::Punct,
            MathClass::Opening => Self::Open,
            MathClass::Closing => Self::Close,
            MathClass::Unary => Self::Prefix,
            _ => Self::Ordinary,
        }
    }
}
