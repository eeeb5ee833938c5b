//! Job aggregate and its lease flags.

use super::{JobId, ParseJobFunctionError};
use crate::tag::{Tag, TagError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Work a job asks the worker to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobFunction {
    /// Build and test one tag.
    Build,
}

impl JobFunction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Build => "build",
        }
    }
}

impl TryFrom<&str> for JobFunction {
    type Error = ParseJobFunctionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "build" => Ok(Self::Build),
            _ => Err(ParseJobFunctionError(value.to_owned())),
        }
    }
}

/// Tag fields stored with each job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPayload {
    /// Canonical tag string.
    pub tag: String,
    /// Extension name.
    pub ext: String,
    /// Build channel.
    pub ver: String,
    /// PHP version token, including any `-zts` marker.
    pub php: String,
    /// Operating system name.
    pub os: String,
}

impl JobPayload {
    /// Returns the parsed tag.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::InvalidTagFormat`] when the stored tag string is
    /// malformed.
    pub fn to_tag(&self) -> Result<Tag, TagError> {
        Tag::parse(&self.tag)
    }
}

impl From<&Tag> for JobPayload {
    fn from(tag: &Tag) -> Self {
        Self {
            tag: tag.to_string(),
            ext: tag.extension().to_owned(),
            ver: tag.channel().as_str().to_owned(),
            php: tag.php_version().to_string(),
            os: tag.os().to_owned(),
        }
    }
}

/// A job that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    function: JobFunction,
    payload: JobPayload,
    created_at: DateTime<Utc>,
}

impl NewJob {
    /// Creates a build job for `tag`.
    #[must_use]
    pub fn build(tag: &Tag, clock: &impl Clock) -> Self {
        Self {
            function: JobFunction::Build,
            payload: JobPayload::from(tag),
            created_at: clock.utc(),
        }
    }

    /// Returns the job function.
    #[must_use]
    pub const fn function(&self) -> JobFunction {
        self.function
    }

    /// Returns the payload.
    #[must_use]
    pub const fn payload(&self) -> &JobPayload {
        &self.payload
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Attaches the identifier assigned by storage.
    #[must_use]
    pub fn into_job(self, id: JobId) -> Job {
        Job {
            id,
            function: self.function,
            payload: self.payload,
            assigned: false,
            finished: false,
            failed: false,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Job aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    id: JobId,
    function: JobFunction,
    payload: JobPayload,
    assigned: bool,
    finished: bool,
    failed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedJobData {
    /// Persisted identifier.
    pub id: JobId,
    /// Persisted function.
    pub function: JobFunction,
    /// Persisted payload.
    pub payload: JobPayload,
    /// Lease flag.
    pub assigned: bool,
    /// Terminal flag.
    pub finished: bool,
    /// Failure flag.
    pub failed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Reconstructs a job from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedJobData) -> Self {
        Self {
            id: data.id,
            function: data.function,
            payload: data.payload,
            assigned: data.assigned,
            finished: data.finished,
            failed: data.failed,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the job identifier.
    #[must_use]
    pub const fn id(&self) -> JobId {
        self.id
    }

    /// Returns the job function.
    #[must_use]
    pub const fn function(&self) -> JobFunction {
        self.function
    }

    /// Returns the payload.
    #[must_use]
    pub const fn payload(&self) -> &JobPayload {
        &self.payload
    }

    /// Returns `true` while a worker holds the lease.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.assigned
    }

    /// Returns `true` once the job reached a terminal state.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns `true` when the job finished unsuccessfully.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        self.failed
    }

    /// Returns `true` when no worker holds the job and it is not finished.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        !self.assigned && !self.finished
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Takes the lease.
    pub fn mark_assigned(&mut self, clock: &impl Clock) {
        self.assigned = true;
        self.touch(clock);
    }

    /// Releases the lease and records the terminal outcome.
    pub fn finish(&mut self, failed: bool, clock: &impl Clock) {
        self.assigned = false;
        self.finished = true;
        self.failed = failed;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Queue totals reported by `build:status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobCounts {
    /// Every job ever enqueued.
    pub total: u64,
    /// Jobs currently leased by a worker.
    pub assigned: u64,
    /// Jobs in a terminal state.
    pub finished: u64,
    /// Jobs flagged as failed.
    pub failed: u64,
    /// Finished jobs that did not fail.
    pub successful: u64,
}

impl JobCounts {
    /// Returns the jobs still waiting for a worker.
    #[must_use]
    pub const fn waiting(&self) -> u64 {
        self.total
            .saturating_sub(self.assigned)
            .saturating_sub(self.finished)
    }
}
