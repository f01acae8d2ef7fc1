//! Lengths, glue and the box grammar.

mod evaluated;
mod glue;
mod horz;
mod length;
mod paddings;
mod point;
mod ratio;
mod vert;

pub use self::evaluated::*;
pub use self::glue::*;
pub use self::horz::*;
pub use self::length::*;
pub use self::paddings::*;
pub use self::point::*;
pub use self::ratio::*;
pub use self::vert::*;
