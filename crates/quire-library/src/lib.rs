//! Quire's core library: lengths, glue, the box grammar and the math
//! vocabulary that line and page breaking operate on.
//!
//! The crate is organized into modules by concern:
//! - [`layout`]: Lengths, glue, ratios and the three tiers of boxes.
//! - [`visualize`]: Colors, drawing operations and decoration callbacks.
//! - [`text`]: The typesetting context and script-to-font resolution.
//! - [`math`]: The math context and the math element grammar.
//! - [`diag`]: Error vocabulary shared by all of the above.

pub mod diag;
pub mod layout;
pub mod math;
pub mod text;
pub mod visualize;
