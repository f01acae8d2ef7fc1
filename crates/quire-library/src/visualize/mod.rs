//! Colors, drawing operations and the callbacks that produce them.

mod color;
mod decoration;

pub use self::color::*;
pub use self::decoration::*;
