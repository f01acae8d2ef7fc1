use std::fmt::{self, Debug, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use quire_utils::{Numeric, Scalar, round_with_precision};
use serde::{Deserialize, Serialize};

/// A physical length.
///
/// Stored in PDF points. The raw number is only reachable through the
/// explicit `to_*` conversions.
#[derive(Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Length(Scalar);

impl Length {
    /// Lengths whose magnitude lies below this many points are considered
    /// negligible when deciding whether glue can stretch or shrink.
    pub const EPSILON: f64 = 0.01;

    /// The zero length.
    pub const fn zero() -> Self {
        Self(Scalar::ZERO)
    }

    /// The infinite length.
    pub const fn inf() -> Self {
        Self(Scalar::INFINITY)
    }

    /// Create a length from a number of PDF points.
    pub const fn pt(pt: f64) -> Self {
        Self(Scalar::new(pt))
    }

    /// Create a length from a number of millimeters.
    pub fn mm(mm: f64) -> Self {
        Self::with_unit(mm, LengthUnit::Mm)
    }

    /// Create a length from a number of centimeters.
    pub fn cm(cm: f64) -> Self {
        Self::with_unit(cm, LengthUnit::Cm)
    }

    /// Create a length from a number of inches.
    pub fn inches(inches: f64) -> Self {
        Self::with_unit(inches, LengthUnit::In)
    }

    /// Create a length from a value in a unit.
    pub fn with_unit(val: f64, unit: LengthUnit) -> Self {
        Self::pt(unit.to_points(val))
    }

    /// Get the value of this length in points.
    pub const fn to_pt(self) -> f64 {
        self.0.get()
    }

    /// Get the value of this length in millimeters.
    pub fn to_mm(self) -> f64 {
        self.to_unit(LengthUnit::Mm)
    }

    /// Get the value of this length in centimeters.
    pub fn to_cm(self) -> f64 {
        self.to_unit(LengthUnit::Cm)
    }

    /// Get the value of this length in inches.
    pub fn to_inches(self) -> f64 {
        self.to_unit(LengthUnit::In)
    }

    /// Get the value of this length in a unit.
    pub fn to_unit(self, unit: LengthUnit) -> f64 {
        unit.from_points(self.to_pt())
    }

    /// The absolute value of this length.
    pub fn abs(self) -> Self {
        Self::pt(self.to_pt().abs())
    }

    /// The maximum of this and the other length.
    pub fn max(self, other: Self) -> Self {
        if self < other { other } else { self }
    }

    /// Set to the maximum of this and another length.
    pub fn set_max(&mut self, other: Self) {
        *self = (*self).max(other);
    }

    /// The minimum of this and another length.
    pub fn min(self, other: Self) -> Self {
        if self > other { other } else { self }
    }

    /// Set to the minimum of this and another length.
    pub fn set_min(&mut self, other: Self) {
        *self = (*self).min(other);
    }

    /// Whether the magnitude of this length is below [`Self::EPSILON`].
    pub fn is_nearly_zero(self) -> bool {
        self.to_pt().abs() < Self::EPSILON
    }

    /// Whether the other length is within [`Self::EPSILON`] of this one.
    pub fn approx_eq(self, other: Self) -> bool {
        (self - other).is_nearly_zero()
    }
}

impl Numeric for Length {
    fn zero() -> Self {
        Self::zero()
    }

    fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Debug for Length {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}pt", round_with_precision(self.to_pt(), 2))
    }
}

impl Neg for Length {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Add for Length {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Length {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Mul<f64> for Length {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self(self.0 * other)
    }
}

impl Mul<Length> for f64 {
    type Output = Length;

    fn mul(self, other: Length) -> Length {
        other * self
    }
}

impl Div<f64> for Length {
    type Output = Self;

    fn div(self, other: f64) -> Self {
        Self(self.0 / other)
    }
}

/// The ratio of two lengths.
///
/// Dividing by an exactly zero length is the caller's responsibility and
/// yields a non-finite number.
impl Div for Length {
    type Output = f64;

    fn div(self, other: Self) -> f64 {
        self.to_pt() / other.to_pt()
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl SubAssign for Length {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl MulAssign<f64> for Length {
    fn mul_assign(&mut self, other: f64) {
        *self = *self * other;
    }
}

impl DivAssign<f64> for Length {
    fn div_assign(&mut self, other: f64) {
        *self = *self / other;
    }
}

impl Sum for Length {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|s| s.0).sum())
    }
}

impl<'a> Sum<&'a Self> for Length {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        Self(iter.map(|s| s.0).sum())
    }
}

impl From<Length> for f64 {
    /// The value in points.
    fn from(length: Length) -> Self {
        length.to_pt()
    }
}

/// Different units of length measurement.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// PDF points.
    Pt,
    /// Millimeters.
    Mm,
    /// Centimeters.
    Cm,
    /// Inches.
    In,
}

impl LengthUnit {
    /// Points per inch. Every conversion goes through this resolution.
    pub const REFERENCE_DPI: f64 = 72.0;

    /// How many of this unit make up an inch at `dpi` points per inch.
    fn per_inch(self, dpi: f64) -> f64 {
        match self {
            Self::Pt => dpi,
            Self::Mm => 25.4,
            Self::Cm => 2.54,
            Self::In => 1.0,
        }
    }

    fn to_points(self, value: f64) -> f64 {
        convert(value, self, Self::Pt, Self::REFERENCE_DPI)
    }

    fn from_points(self, points: f64) -> f64 {
        convert(points, Self::Pt, self, Self::REFERENCE_DPI)
    }
}

/// Convert `value` from one unit to another, with points resolved at `dpi`
/// points per inch.
fn convert(value: f64, from: LengthUnit, to: LengthUnit, dpi: f64) -> f64 {
    value / from.per_inch(dpi) * to.per_inch(dpi)
}
