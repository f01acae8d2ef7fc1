//! Quire's layout algorithms.

mod math;

pub use self::math::lower;
