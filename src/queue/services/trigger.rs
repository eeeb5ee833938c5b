//! Trigger service: turns tag patterns into queued jobs.

use super::{JobQueue, QueueError};
use crate::matrix::TagPattern;
use crate::queue::{domain::Job, ports::JobRepository};
use crate::spec::{
    ports::{SpecError, SpecSource},
    services::SpecRegistry,
};
use crate::tag::{Tag, TagError};
use mockable::Clock;
use thiserror::Error;
use tracing::info;

/// Errors raised while enqueueing a pattern.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// The pattern or a resolved tag is malformed.
    #[error(transparent)]
    Tag(#[from] TagError),
    /// Spec lookup failed or named an unknown extension or OS.
    #[error(transparent)]
    Spec(#[from] SpecError),
    /// Queue operation failed.
    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Result type for trigger operations.
pub type TriggerResult<T> = Result<T, TriggerError>;

/// Enqueues one build job per resolved tag.
pub struct TriggerService<S, R, C>
where
    S: SpecSource,
    R: JobRepository,
    C: Clock + Send + Sync,
{
    registry: SpecRegistry<S>,
    queue: JobQueue<R, C>,
}

impl<S, R, C> TriggerService<S, R, C>
where
    S: SpecSource,
    R: JobRepository,
    C: Clock + Send + Sync,
{
    /// Creates a trigger over `registry` feeding `queue`.
    #[must_use]
    pub const fn new(registry: SpecRegistry<S>, queue: JobQueue<R, C>) -> Self {
        Self { registry, queue }
    }

    /// Resolves `pattern` and enqueues a job for every resulting tag.
    ///
    /// Every tag is validated against the enabled extensions and operating
    /// systems first; nothing is enqueued unless all of them pass.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::Tag`] for malformed patterns or tags,
    /// [`TriggerError::Spec`] when a tag names an unknown extension or OS,
    /// and [`TriggerError::Queue`] when an insert fails.
    pub async fn enqueue_pattern(&self, pattern: &str) -> TriggerResult<Vec<Job>> {
        let parsed = TagPattern::parse(pattern)?;
        let tags = parsed
            .resolve(&self.registry)?
            .collect::<Result<Vec<_>, _>>()?;
        self.validate(&tags)?;
        let jobs = self.enqueue_all(&tags).await?;
        info!(pattern = %parsed, count = jobs.len(), "enqueued pattern");
        Ok(jobs)
    }

    /// Enqueues a job for every tag of the current build matrix.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::Spec`] when a spec document cannot be loaded,
    /// and [`TriggerError::Queue`] when an insert fails.
    pub async fn enqueue_build_matrix(&self) -> TriggerResult<Vec<Job>> {
        let tags = self
            .registry
            .build_matrix()?
            .iter()
            .map(String::as_str)
            .map(Tag::parse)
            .collect::<Result<Vec<_>, _>>()?;
        let jobs = self.enqueue_all(&tags).await?;
        info!(count = jobs.len(), "enqueued build matrix");
        Ok(jobs)
    }

    fn validate(&self, tags: &[Tag]) -> TriggerResult<()> {
        let extensions = self.registry.extension_list()?;
        let systems = self.registry.os_list()?;
        for tag in tags {
            if !extensions.iter().any(|name| name == tag.extension()) {
                return Err(SpecError::UnknownExtension(tag.extension().to_owned()).into());
            }
            if !systems.iter().any(|name| name == tag.os()) {
                return Err(SpecError::UnknownOperatingSystem(tag.os().to_owned()).into());
            }
        }
        Ok(())
    }

    async fn enqueue_all(&self, tags: &[Tag]) -> TriggerResult<Vec<Job>> {
        let mut jobs = Vec::with_capacity(tags.len());
        for tag in tags {
            jobs.push(self.queue.enqueue(tag).await?);
        }
        Ok(jobs)
    }
}
