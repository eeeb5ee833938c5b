//! Port contracts for the build context.

pub mod engine;

pub use engine::{BuildRequest, ContainerEngine, ContainerEngineError, ContainerEngineResult};
