//! Repository port for job persistence and leasing.

use crate::queue::domain::{Job, JobCounts, JobFunction, JobId, NewJob};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for job repository operations.
pub type JobRepositoryResult<T> = Result<T, JobRepositoryError>;

/// Job persistence contract.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Stores a new job and returns it with its assigned identifier.
    async fn insert(&self, job: NewJob) -> JobRepositoryResult<Job>;

    /// Persists the flags and timestamps of an existing job.
    ///
    /// # Errors
    ///
    /// Returns [`JobRepositoryError::NotFound`] when the job does not exist.
    async fn update(&self, job: &Job) -> JobRepositoryResult<()>;

    /// Finds a job by identifier.
    ///
    /// Returns `None` when the job does not exist.
    async fn find_by_id(&self, id: JobId) -> JobRepositoryResult<Option<Job>>;

    /// Returns the oldest job for `function` that is neither assigned nor
    /// finished.
    async fn oldest_available(&self, function: JobFunction) -> JobRepositoryResult<Option<Job>>;

    /// Takes the lease on `id` only if the job is still available, stamping
    /// `at` as its update time.
    ///
    /// Returns `false` when another worker took the job first.
    async fn try_assign(&self, id: JobId, at: DateTime<Utc>) -> JobRepositoryResult<bool>;

    /// Returns assigned, unfinished jobs last updated strictly before
    /// `updated_before`, oldest first.
    async fn find_dangling(&self, updated_before: DateTime<Utc>) -> JobRepositoryResult<Vec<Job>>;

    /// Returns queue totals.
    async fn counts(&self) -> JobRepositoryResult<JobCounts>;
}

/// Errors returned by job repository implementations.
#[derive(Debug, Clone, Error)]
pub enum JobRepositoryError {
    /// The job was not found.
    #[error("job not found: {0}")]
    NotFound(JobId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl JobRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
