//! The math context and the math element grammar.

mod builders;
mod ctx;
mod item;
mod kind;

pub use self::builders::*;
pub use self::ctx::*;
pub use self::item::*;
pub use self::kind::*;
