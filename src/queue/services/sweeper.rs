//! Reclaims jobs whose lease outlived the timeout.

use super::QueueResult;
use crate::queue::ports::JobRepository;
use crate::status::{ports::StatusRepository, services::StatusStore};
use chrono::TimeDelta;
use mockable::Clock;
use std::sync::Arc;
use tracing::{info, warn};

/// Lease length after which an unfinished job counts as dangling.
pub const DEFAULT_LEASE_TIMEOUT: TimeDelta = TimeDelta::hours(1);

/// Log stored on the status of a reclaimed job.
pub const DANGLING_BUILD_MESSAGE: &str = "Dangling build process";

/// Maintenance sweep over abandoned leases.
pub struct DanglingJobSweeper<J, S, C>
where
    J: JobRepository,
    S: StatusRepository,
    C: Clock + Send + Sync,
{
    jobs: Arc<J>,
    statuses: StatusStore<S, C>,
    clock: Arc<C>,
}

impl<J, S, C> DanglingJobSweeper<J, S, C>
where
    J: JobRepository,
    S: StatusRepository,
    C: Clock + Send + Sync,
{
    /// Creates a sweeper over the job and status repositories.
    #[must_use]
    pub fn new(jobs: Arc<J>, statuses: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            jobs,
            statuses: StatusStore::new(statuses, Arc::clone(&clock)),
            clock,
        }
    }

    /// Fails every job assigned but untouched for longer than `lease`.
    ///
    /// Each job's status is set to `FAIL` with [`DANGLING_BUILD_MESSAGE`]
    /// before the job itself is marked finished and failed. Returns the
    /// number of reclaimed jobs.
    ///
    /// # Errors
    ///
    /// Returns a queue error when a lookup or write fails; jobs handled
    /// before the failure stay reclaimed.
    pub async fn sweep(&self, lease: TimeDelta) -> QueueResult<usize> {
        let cutoff = self.clock.utc() - lease;
        let dangling = self.jobs.find_dangling(cutoff).await?;
        let mut reclaimed = 0_usize;
        for mut job in dangling {
            match job.payload().to_tag() {
                Ok(tag) => {
                    let mut status = self.statuses.open(&tag).await?;
                    status.record_failure(DANGLING_BUILD_MESSAGE, &*self.clock);
                    self.statuses.save(&status).await?;
                }
                Err(err) => {
                    warn!(job_id = %job.id(), error = %err, "dangling job carries an invalid tag");
                }
            }
            job.finish(true, &*self.clock);
            self.jobs.update(&job).await?;
            info!(job_id = %job.id(), tag = %job.payload().tag, "reclaimed dangling job");
            reclaimed += 1;
        }
        Ok(reclaimed)
    }
}
