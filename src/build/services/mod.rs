//! Application services for running image builds.

mod executor;

pub use executor::{BuildError, BuildExecutor, BuildOutcome, BuildReport, BuildResult};
