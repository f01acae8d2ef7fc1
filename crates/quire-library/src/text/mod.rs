//! The typesetting context and script-to-font resolution.

mod context;
mod font;
mod script;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use self::context::*;
pub use self::font::*;
pub use self::script::*;
