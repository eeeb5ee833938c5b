//! Job queue service: enqueue, claim and complete.

use crate::queue::{
    domain::{Job, JobCounts, JobFunction, NewJob},
    ports::{JobRepository, JobRepositoryError},
};
use crate::status::ports::StatusRepositoryError;
use crate::tag::Tag;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for queue operations.
#[derive(Debug, Error)]
pub enum QueueError {
    /// Job repository operation failed.
    #[error(transparent)]
    Repository(#[from] JobRepositoryError),
    /// Status repository operation failed.
    #[error(transparent)]
    Status(#[from] StatusRepositoryError),
}

/// Result type for queue service operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// FIFO build queue with compare-and-set leasing.
pub struct JobQueue<R, C>
where
    R: JobRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for JobQueue<R, C>
where
    R: JobRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> JobQueue<R, C>
where
    R: JobRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new queue service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Enqueues a build job for `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Repository`] when the insert fails.
    pub async fn enqueue(&self, tag: &Tag) -> QueueResult<Job> {
        let job = self
            .repository
            .insert(NewJob::build(tag, &*self.clock))
            .await?;
        debug!(job_id = %job.id(), tag = %tag, "enqueued build job");
        Ok(job)
    }

    /// Leases the oldest available build job.
    ///
    /// A job taken by another worker between lookup and lease is passed
    /// over in favour of the next oldest. Returns `None` once nothing is
    /// available.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Repository`] when a lookup or the lease fails.
    pub async fn claim_next(&self) -> QueueResult<Option<Job>> {
        loop {
            let Some(mut job) = self.repository.oldest_available(JobFunction::Build).await?
            else {
                return Ok(None);
            };
            job.mark_assigned(&*self.clock);
            if self.repository.try_assign(job.id(), job.updated_at()).await? {
                info!(job_id = %job.id(), tag = %job.payload().tag, "claimed job");
                return Ok(Some(job));
            }
            debug!(job_id = %job.id(), "job claimed elsewhere");
        }
    }

    /// Releases the lease on `job` and records its terminal outcome.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Repository`] when the update fails.
    pub async fn complete(&self, job: &mut Job, failed: bool) -> QueueResult<()> {
        job.finish(failed, &*self.clock);
        self.repository.update(job).await?;
        debug!(job_id = %job.id(), failed, "completed job");
        Ok(())
    }

    /// Returns queue totals.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Repository`] when the lookup fails.
    pub async fn counts(&self) -> QueueResult<JobCounts> {
        Ok(self.repository.counts().await?)
    }
}
