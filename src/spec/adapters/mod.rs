//! Spec source adapters.

pub mod json;
pub mod memory;

pub use json::JsonSpecSource;
pub use memory::InMemorySpecSource;
