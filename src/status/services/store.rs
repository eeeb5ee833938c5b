//! Status store: lazily created per-tag status records.

use crate::status::{
    domain::{BuildStatus, PENDING_LABEL},
    ports::{StatusRepository, StatusRepositoryResult},
};
use crate::tag::Tag;
use mockable::Clock;
use std::sync::Arc;
use tracing::debug;

/// Status store service.
pub struct StatusStore<R, C>
where
    R: StatusRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for StatusStore<R, C>
where
    R: StatusRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> StatusStore<R, C>
where
    R: StatusRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new status store.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns the stored status of `tag`, creating and saving a
    /// [`BUILD`](crate::status::domain::StatusLabel::Build) status when none
    /// exists yet.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the lookup or the initial save
    /// fails.
    pub async fn open(&self, tag: &Tag) -> StatusRepositoryResult<BuildStatus> {
        if let Some(existing) = self.repository.find(tag).await? {
            return Ok(existing);
        }
        let status = BuildStatus::new(tag.clone(), &*self.clock);
        self.repository.save(&status).await?;
        debug!(tag = %tag, "created build status");
        Ok(status)
    }

    /// Persists `status`.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the write fails.
    pub async fn save(&self, status: &BuildStatus) -> StatusRepositoryResult<()> {
        self.repository.save(status).await
    }

    /// Looks up the status of `tag` without creating one.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the lookup fails.
    pub async fn find(&self, tag: &Tag) -> StatusRepositoryResult<Option<BuildStatus>> {
        self.repository.find(tag).await
    }

    /// Returns every stored status ordered by tag.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the lookup fails.
    pub async fn list(&self) -> StatusRepositoryResult<Vec<BuildStatus>> {
        self.repository.list().await
    }

    /// Returns the label to display for `tag`: the stored label, or
    /// `PENDING` when the tag has never been processed.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the lookup fails.
    pub async fn display_label(&self, tag: &Tag) -> StatusRepositoryResult<&'static str> {
        Ok(self
            .repository
            .find(tag)
            .await?
            .map_or(PENDING_LABEL, |status| status.label().as_str()))
    }
}
