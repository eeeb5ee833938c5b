//! Repository port for build statuses.

use crate::status::domain::BuildStatus;
use crate::tag::Tag;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for status repository operations.
pub type StatusRepositoryResult<T> = Result<T, StatusRepositoryError>;

/// Status persistence contract, keyed by canonical tag.
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// Finds the status of `tag`.
    ///
    /// Returns `None` when the tag has never been processed.
    async fn find(&self, tag: &Tag) -> StatusRepositoryResult<Option<BuildStatus>>;

    /// Inserts or replaces the status stored under its tag.
    async fn save(&self, status: &BuildStatus) -> StatusRepositoryResult<()>;

    /// Returns every stored status ordered by tag.
    async fn list(&self) -> StatusRepositoryResult<Vec<BuildStatus>>;
}

/// Errors returned by status repository implementations.
#[derive(Debug, Clone, Error)]
pub enum StatusRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StatusRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
