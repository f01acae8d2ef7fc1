use std::iter::Sum;
use std::ops::{Add, AddAssign};

use super::Length;

/// How far a piece of glue may stretch.
///
/// Finite stretch is an ordinary length. Fil stretch is unbounded and comes
/// in integer multiplicities; any amount of it absorbs all finite stretch it
/// is combined with.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Stretchable {
    /// A bounded amount of stretch.
    Finite(Length),
    /// Unbounded stretch of the given multiplicity.
    Fils(i32),
}

impl Stretchable {
    /// No stretch at all.
    pub const fn zero() -> Self {
        Self::Finite(Length::zero())
    }

    /// Whether this is unbounded stretch.
    pub fn is_fil(self) -> bool {
        matches!(self, Self::Fils(_))
    }

    /// Combine two stretch specifications.
    ///
    /// Finite amounts sum and fil multiplicities sum. When only one side is a
    /// fil quantity, the result is that side unchanged.
    pub fn add(self, other: Self) -> Self {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => Self::Finite(a + b),
            (Self::Fils(a), Self::Fils(b)) => Self::Fils(a + b),
            (Self::Fils(n), Self::Finite(_)) | (Self::Finite(_), Self::Fils(n)) => {
                Self::Fils(n)
            }
        }
    }
}

impl Default for Stretchable {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for Stretchable {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Stretchable::add(self, other)
    }
}

/// The glue triple attached to adjustable space.
///
/// Shrink is always bounded; stretch may be unbounded.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct LengthInfo {
    /// The width the glue has when neither stretched nor shrunk.
    pub natural: Length,
    /// How much the glue may give up at most.
    pub shrinkable: Length,
    /// How much the glue may grow.
    pub stretchable: Stretchable,
}

impl LengthInfo {
    /// Glue with all three components zero.
    pub const fn zero() -> Self {
        Self::rigid(Length::zero())
    }

    /// Create a new glue triple.
    pub const fn new(natural: Length, shrinkable: Length, stretchable: Stretchable) -> Self {
        Self { natural, shrinkable, stretchable }
    }

    /// Glue with the given natural width that neither shrinks nor stretches.
    pub const fn rigid(natural: Length) -> Self {
        Self {
            natural,
            shrinkable: Length::zero(),
            stretchable: Stretchable::zero(),
        }
    }

    /// Glue of zero natural width with one unit of fil stretch.
    pub const fn fil() -> Self {
        Self {
            natural: Length::zero(),
            shrinkable: Length::zero(),
            stretchable: Stretchable::Fils(1),
        }
    }

    /// Whether this glue can neither shrink nor stretch.
    pub fn is_rigid(&self) -> bool {
        self.shrinkable.is_nearly_zero()
            && matches!(self.stretchable, Stretchable::Finite(s) if s.is_nearly_zero())
    }
}

impl Add for LengthInfo {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            natural: self.natural + other.natural,
            shrinkable: self.shrinkable + other.shrinkable,
            stretchable: self.stretchable + other.stretchable,
        }
    }
}

impl AddAssign for LengthInfo {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for LengthInfo {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

/// The extent of a horizontal box or box list.
///
/// Height is measured upwards from the baseline and depth downwards.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Metrics {
    pub width: LengthInfo,
    pub height: Length,
    pub depth: Length,
}

impl Metrics {
    /// Metrics of something that takes no space.
    pub const fn zero() -> Self {
        Self {
            width: LengthInfo::zero(),
            height: Length::zero(),
            depth: Length::zero(),
        }
    }

    /// Metrics of a rigid box.
    pub const fn rigid(width: Length, height: Length, depth: Length) -> Self {
        Self { width: LengthInfo::rigid(width), height, depth }
    }

    /// Metrics of `self` followed by `other` on the same baseline.
    pub fn beside(self, other: Self) -> Self {
        Self {
            width: self.width + other.width,
            height: self.height.max(other.height),
            depth: self.depth.max(other.depth),
        }
    }

    /// Metrics after shifting the baseline up by `rising`.
    pub fn raised(self, rising: Length) -> Self {
        Self {
            width: self.width,
            height: self.height + rising,
            depth: self.depth - rising,
        }
    }
}

impl Sum for Metrics {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Metrics::beside)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stretchable_fils_add_multiplicities() {
        assert_eq!(Stretchable::Fils(2).add(Stretchable::Fils(3)), Stretchable::Fils(5));
    }

    #[test]
    fn test_stretchable_fil_absorbs_finite() {
        for x in [0.0, 1.0, 250.0, -3.0] {
            let finite = Stretchable::Finite(Length::pt(x));
            assert_eq!(Stretchable::Fils(2).add(finite), Stretchable::Fils(2));
            assert_eq!(finite.add(Stretchable::Fils(2)), Stretchable::Fils(2));
        }
    }

    #[test]
    fn test_stretchable_finite_sums() {
        let (a, b) = (Length::pt(1.5), Length::pt(4.0));
        assert_eq!(
            Stretchable::Finite(a) + Stretchable::Finite(b),
            Stretchable::Finite(a + b),
        );
    }

    #[test]
    fn test_length_info_composes_componentwise() {
        let word = LengthInfo::rigid(Length::pt(10.0));
        let space = LengthInfo::new(
            Length::pt(3.0),
            Length::pt(1.0),
            Stretchable::Finite(Length::pt(2.0)),
        );
        let total: LengthInfo = [word, space, word, LengthInfo::fil()].into_iter().sum();
        assert_eq!(total.natural, Length::pt(23.0));
        assert_eq!(total.shrinkable, Length::pt(1.0));
        assert_eq!(total.stretchable, Stretchable::Fils(1));
        assert!(word.is_rigid());
        assert!(!space.is_rigid());
    }

    #[test]
    fn test_metrics_beside_and_raised() {
        let a = Metrics::rigid(Length::pt(5.0), Length::pt(7.0), Length::pt(2.0));
        let b = Metrics::rigid(Length::pt(3.0), Length::pt(4.0), Length::pt(3.0));
        let both = a.beside(b);
        assert_eq!(both.width.natural, Length::pt(8.0));
        assert_eq!(both.height, Length::pt(7.0));
        assert_eq!(both.depth, Length::pt(3.0));

        let raised = b.raised(Length::pt(2.0));
        assert_eq!(raised.height, Length::pt(6.0));
        assert_eq!(raised.depth, Length::pt(1.0));
    }
}
