//! Port contracts for build status storage.

pub mod repository;

pub use repository::{StatusRepository, StatusRepositoryError, StatusRepositoryResult};
