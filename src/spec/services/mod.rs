//! Derived views over the spec documents.

pub mod registry;

pub use registry::SpecRegistry;
