//! Port contracts for spec document sources.

pub mod source;

pub use source::{SpecError, SpecResult, SpecSource};
