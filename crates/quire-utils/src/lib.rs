//! Utilities for Quire.

mod scalar;

pub use self::scalar::Scalar;

use std::ops::{Add, Div, Mul, Neg, Sub};

/// A trait for types that can be used as numeric values in layout.
pub trait Numeric:
    Sized
    + Copy
    + PartialEq
    + PartialOrd
    + Neg<Output = Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
{
    /// The identity element for addition.
    fn zero() -> Self;

    /// Whether `self` is zero.
    fn is_zero(self) -> bool {
        self == Self::zero()
    }

    /// Whether `self` consists only of finite parts.
    fn is_finite(self) -> bool;
}

/// Round a float to a fixed number of decimal places.
///
/// Used to keep debug output stable.
pub fn round_with_precision(value: f64, precision: u8) -> f64 {
    if value.is_infinite() || value.is_nan() {
        return value;
    }
    let factor = 10_f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Assert that two floating-point-backed values are within `eps` of each
/// other. Accepts anything with an `approx_eq` method or plain `f64`s.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr) => {
        $crate::assert_approx_eq!($left, $right, 1e-9)
    };
    ($left:expr, $right:expr, $eps:expr) => {{
        let (left, right): (f64, f64) = ($left.into(), $right.into());
        assert!(
            (left - right).abs() <= $eps,
            "assertion failed: `{left} ≈ {right}` (tolerance {})",
            $eps,
        );
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_with_precision() {
        assert_eq!(round_with_precision(1.23456, 2), 1.23);
        assert_eq!(round_with_precision(-2.5, 0), -3.0);
        assert!(round_with_precision(f64::INFINITY, 2).is_infinite());
    }

    #[test]
    fn test_assert_approx_eq_accepts_close_values() {
        assert_approx_eq!(0.1 + 0.2, 0.3);
        assert_approx_eq!(1.0, 1.004, 0.01);
    }
}
