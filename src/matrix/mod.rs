//! Matrix engine: wildcard tag patterns and their lazy expansion.
//!
//! A [`TagPattern`] holds either a literal or the wildcard `*` for each of
//! the four tag fields. [`TagPattern::resolve`] draws candidates for every
//! wildcard from the spec registry and returns a [`TagMatrix`], which yields
//! the Cartesian product with the extension outermost and the operating
//! system innermost.

mod pattern;
mod product;

pub use pattern::{PatternField, TagPattern};
pub use product::TagMatrix;
