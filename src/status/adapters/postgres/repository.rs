//! `PostgreSQL` repository implementation for build statuses.

use super::{models::StatusRow, schema::statuses};
use crate::persistence::PgPool;
use crate::status::{
    domain::{BuildStatus, PersistedStatusData, StatusLabel},
    ports::{StatusRepository, StatusRepositoryError, StatusRepositoryResult},
};
use crate::tag::Tag;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed status repository.
#[derive(Debug, Clone)]
pub struct PostgresStatusRepository {
    pool: PgPool,
}

impl PostgresStatusRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> StatusRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> StatusRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(StatusRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(StatusRepositoryError::persistence)?
    }
}

#[async_trait]
impl StatusRepository for PostgresStatusRepository {
    async fn find(&self, tag: &Tag) -> StatusRepositoryResult<Option<BuildStatus>> {
        let id = tag.to_string();
        self.run_blocking(move |connection| {
            let row = statuses::table
                .find(id)
                .select(StatusRow::as_select())
                .first::<StatusRow>(connection)
                .optional()
                .map_err(StatusRepositoryError::persistence)?;
            row.map(row_to_status).transpose()
        })
        .await
    }

    async fn save(&self, status: &BuildStatus) -> StatusRepositoryResult<()> {
        let row = to_row(status)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(statuses::table)
                .values(&row)
                .on_conflict(statuses::id)
                .do_update()
                .set(&row)
                .execute(connection)
                .map_err(StatusRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn list(&self) -> StatusRepositoryResult<Vec<BuildStatus>> {
        self.run_blocking(move |connection| {
            statuses::table
                .order(statuses::id.asc())
                .select(StatusRow::as_select())
                .load::<StatusRow>(connection)
                .map_err(StatusRepositoryError::persistence)?
                .into_iter()
                .map(row_to_status)
                .collect()
        })
        .await
    }
}

fn to_row(status: &BuildStatus) -> StatusRepositoryResult<StatusRow> {
    let build_time =
        i32::try_from(status.build_time_secs()).map_err(StatusRepositoryError::persistence)?;
    Ok(StatusRow {
        id: status.tag().to_string(),
        label: status.label().as_str().to_owned(),
        file: status.file().map(str::to_owned),
        log: status.log().map(str::to_owned),
        build_time,
        changed: status.is_changed(),
        created_at: status.created_at(),
        updated_at: status.updated_at(),
    })
}

fn row_to_status(row: StatusRow) -> StatusRepositoryResult<BuildStatus> {
    let StatusRow {
        id,
        label: persisted_label,
        file,
        log,
        build_time,
        changed,
        created_at,
        updated_at,
    } = row;

    let tag = Tag::parse(&id).map_err(StatusRepositoryError::persistence)?;
    let label = StatusLabel::try_from(persisted_label.as_str())
        .map_err(StatusRepositoryError::persistence)?;
    let build_time_secs = u32::try_from(build_time).map_err(StatusRepositoryError::persistence)?;

    Ok(BuildStatus::from_persisted(PersistedStatusData {
        tag,
        label,
        file,
        log,
        build_time_secs,
        changed,
        created_at,
        updated_at,
    }))
}
