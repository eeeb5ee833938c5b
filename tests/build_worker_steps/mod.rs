//! Step definitions for build worker scenarios.

mod given;
mod then;
mod when;
pub mod world;
