//! Port contracts for the job queue.

pub mod repository;

pub use repository::{JobRepository, JobRepositoryError, JobRepositoryResult};
