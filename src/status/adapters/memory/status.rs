//! In-memory status repository for tests and single-process runs.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::status::{
    domain::BuildStatus,
    ports::{StatusRepository, StatusRepositoryError, StatusRepositoryResult},
};
use crate::tag::Tag;

/// Thread-safe in-memory status repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStatusRepository {
    statuses: Arc<RwLock<BTreeMap<String, BuildStatus>>>,
}

impl InMemoryStatusRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: &dyn std::fmt::Display) -> StatusRepositoryError {
    StatusRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl StatusRepository for InMemoryStatusRepository {
    async fn find(&self, tag: &Tag) -> StatusRepositoryResult<Option<BuildStatus>> {
        let statuses = self.statuses.read().map_err(|err| poisoned(&err))?;
        Ok(statuses.get(&tag.to_string()).cloned())
    }

    async fn save(&self, status: &BuildStatus) -> StatusRepositoryResult<()> {
        let mut statuses = self.statuses.write().map_err(|err| poisoned(&err))?;
        statuses.insert(status.tag().to_string(), status.clone());
        Ok(())
    }

    async fn list(&self) -> StatusRepositoryResult<Vec<BuildStatus>> {
        let statuses = self.statuses.read().map_err(|err| poisoned(&err))?;
        Ok(statuses.values().cloned().collect())
    }
}
