//! `PostgreSQL` repository implementation for the job queue.

use super::{
    models::{JobRow, NewJobRow},
    schema::jobs,
};
use crate::persistence::PgPool;
use crate::queue::{
    domain::{Job, JobCounts, JobFunction, JobId, JobPayload, NewJob, PersistedJobData},
    ports::{JobRepository, JobRepositoryError, JobRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed job repository.
#[derive(Debug, Clone)]
pub struct PostgresJobRepository {
    pool: PgPool,
}

impl PostgresJobRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> JobRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> JobRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(JobRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(JobRepositoryError::persistence)?
    }
}

#[async_trait]
impl JobRepository for PostgresJobRepository {
    async fn insert(&self, job: NewJob) -> JobRepositoryResult<Job> {
        let payload =
            serde_json::to_string(job.payload()).map_err(JobRepositoryError::persistence)?;
        let new_row = NewJobRow {
            function: job.function().as_str().to_owned(),
            payload,
            created_at: job.created_at(),
            updated_at: job.created_at(),
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(jobs::table)
                .values(&new_row)
                .returning(JobRow::as_returning())
                .get_result::<JobRow>(connection)
                .map_err(JobRepositoryError::persistence)?;
            row_to_job(row)
        })
        .await
    }

    async fn update(&self, job: &Job) -> JobRepositoryResult<()> {
        let id = job.id();
        let assigned = job.is_assigned();
        let finished = job.is_finished();
        let failed = job.is_failed();
        let updated_at = job.updated_at();

        self.run_blocking(move |connection| {
            let updated = diesel::update(jobs::table.find(id.into_inner()))
                .set((
                    jobs::assigned.eq(assigned),
                    jobs::finished.eq(finished),
                    jobs::failed.eq(failed),
                    jobs::updated_at.eq(updated_at),
                ))
                .execute(connection)
                .map_err(JobRepositoryError::persistence)?;
            if updated == 0 {
                return Err(JobRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: JobId) -> JobRepositoryResult<Option<Job>> {
        self.run_blocking(move |connection| {
            let row = jobs::table
                .find(id.into_inner())
                .select(JobRow::as_select())
                .first::<JobRow>(connection)
                .optional()
                .map_err(JobRepositoryError::persistence)?;
            row.map(row_to_job).transpose()
        })
        .await
    }

    async fn oldest_available(&self, function: JobFunction) -> JobRepositoryResult<Option<Job>> {
        self.run_blocking(move |connection| {
            let row = jobs::table
                .filter(jobs::function.eq(function.as_str()))
                .filter(jobs::assigned.eq(false))
                .filter(jobs::finished.eq(false))
                .order((jobs::created_at.asc(), jobs::id.asc()))
                .select(JobRow::as_select())
                .first::<JobRow>(connection)
                .optional()
                .map_err(JobRepositoryError::persistence)?;
            row.map(row_to_job).transpose()
        })
        .await
    }

    async fn try_assign(&self, id: JobId, at: DateTime<Utc>) -> JobRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                jobs::table
                    .filter(jobs::id.eq(id.into_inner()))
                    .filter(jobs::assigned.eq(false))
                    .filter(jobs::finished.eq(false)),
            )
            .set((jobs::assigned.eq(true), jobs::updated_at.eq(at)))
            .execute(connection)
            .map_err(JobRepositoryError::persistence)?;
            Ok(updated == 1)
        })
        .await
    }

    async fn find_dangling(&self, updated_before: DateTime<Utc>) -> JobRepositoryResult<Vec<Job>> {
        self.run_blocking(move |connection| {
            jobs::table
                .filter(jobs::assigned.eq(true))
                .filter(jobs::finished.eq(false))
                .filter(jobs::updated_at.lt(updated_before))
                .order((jobs::created_at.asc(), jobs::id.asc()))
                .select(JobRow::as_select())
                .load::<JobRow>(connection)
                .map_err(JobRepositoryError::persistence)?
                .into_iter()
                .map(row_to_job)
                .collect()
        })
        .await
    }

    async fn counts(&self) -> JobRepositoryResult<JobCounts> {
        self.run_blocking(move |connection| {
            let total = to_count(jobs::table.count().get_result(connection))?;
            let assigned = to_count(
                jobs::table
                    .filter(jobs::assigned.eq(true))
                    .count()
                    .get_result(connection),
            )?;
            let finished = to_count(
                jobs::table
                    .filter(jobs::finished.eq(true))
                    .count()
                    .get_result(connection),
            )?;
            let failed = to_count(
                jobs::table
                    .filter(jobs::failed.eq(true))
                    .count()
                    .get_result(connection),
            )?;
            let successful = to_count(
                jobs::table
                    .filter(jobs::finished.eq(true))
                    .filter(jobs::failed.eq(false))
                    .count()
                    .get_result(connection),
            )?;
            Ok(JobCounts {
                total,
                assigned,
                finished,
                failed,
                successful,
            })
        })
        .await
    }
}

fn to_count(result: QueryResult<i64>) -> JobRepositoryResult<u64> {
    let count = result.map_err(JobRepositoryError::persistence)?;
    u64::try_from(count).map_err(JobRepositoryError::persistence)
}

fn row_to_job(row: JobRow) -> JobRepositoryResult<Job> {
    let JobRow {
        id,
        function: persisted_function,
        payload: persisted_payload,
        assigned,
        finished,
        failed,
        created_at,
        updated_at,
    } = row;

    let function = JobFunction::try_from(persisted_function.as_str())
        .map_err(JobRepositoryError::persistence)?;
    let payload = serde_json::from_str::<JobPayload>(&persisted_payload)
        .map_err(JobRepositoryError::persistence)?;

    Ok(Job::from_persisted(PersistedJobData {
        id: JobId::new(id),
        function,
        payload,
        assigned,
        finished,
        failed,
        created_at,
        updated_at,
    }))
}
