//! In-memory job repository for tests and single-process runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::queue::{
    domain::{Job, JobCounts, JobFunction, JobId, NewJob, PersistedJobData},
    ports::{JobRepository, JobRepositoryError, JobRepositoryResult},
};

/// Thread-safe in-memory job repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobRepository {
    state: Arc<RwLock<InMemoryJobState>>,
}

#[derive(Debug, Default)]
struct InMemoryJobState {
    last_id: i64,
    jobs: BTreeMap<JobId, Job>,
}

impl InMemoryJobRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `job` exactly as given, replacing any job with the same id.
    ///
    /// Lets tests seed leases and timestamps that the queue services would
    /// never produce directly.
    ///
    /// # Errors
    ///
    /// Returns [`JobRepositoryError::Persistence`] when the lock is poisoned.
    pub fn seed(&self, job: Job) -> JobRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.last_id = state.last_id.max(job.id().into_inner());
        state.jobs.insert(job.id(), job);
        Ok(())
    }
}

fn poisoned(err: &dyn std::fmt::Display) -> JobRepositoryError {
    JobRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn with_lease(job: &Job, at: DateTime<Utc>) -> Job {
    Job::from_persisted(PersistedJobData {
        id: job.id(),
        function: job.function(),
        payload: job.payload().clone(),
        assigned: true,
        finished: job.is_finished(),
        failed: job.is_failed(),
        created_at: job.created_at(),
        updated_at: at,
    })
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn insert(&self, job: NewJob) -> JobRepositoryResult<Job> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.last_id += 1;
        let stored = job.into_job(JobId::new(state.last_id));
        state.jobs.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn update(&self, job: &Job) -> JobRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let slot = state
            .jobs
            .get_mut(&job.id())
            .ok_or(JobRepositoryError::NotFound(job.id()))?;
        *slot = job.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: JobId) -> JobRepositoryResult<Option<Job>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.jobs.get(&id).cloned())
    }

    async fn oldest_available(&self, function: JobFunction) -> JobRepositoryResult<Option<Job>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state
            .jobs
            .values()
            .filter(|job| job.function() == function && job.is_available())
            .min_by_key(|job| (job.created_at(), job.id()))
            .cloned())
    }

    async fn try_assign(&self, id: JobId, at: DateTime<Utc>) -> JobRepositoryResult<bool> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        let Some(slot) = state.jobs.get_mut(&id) else {
            return Ok(false);
        };
        if !slot.is_available() {
            return Ok(false);
        }
        *slot = with_lease(slot, at);
        Ok(true)
    }

    async fn find_dangling(&self, updated_before: DateTime<Utc>) -> JobRepositoryResult<Vec<Job>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        let mut dangling: Vec<Job> = state
            .jobs
            .values()
            .filter(|job| {
                job.is_assigned() && !job.is_finished() && job.updated_at() < updated_before
            })
            .cloned()
            .collect();
        dangling.sort_by_key(|job| (job.created_at(), job.id()));
        Ok(dangling)
    }

    async fn counts(&self) -> JobRepositoryResult<JobCounts> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        let tally = |predicate: fn(&Job) -> bool| -> u64 {
            let matching = state.jobs.values().filter(|&job| predicate(job)).count();
            u64::try_from(matching).unwrap_or(u64::MAX)
        };
        Ok(JobCounts {
            total: tally(|_| true),
            assigned: tally(Job::is_assigned),
            finished: tally(Job::is_finished),
            failed: tally(Job::is_failed),
            successful: tally(|job| job.is_finished() && !job.is_failed()),
        })
    }
}
