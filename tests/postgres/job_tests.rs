//! Job repository behaviour against `PostgreSQL`.

use std::sync::Arc;

use super::helpers::{BoxError, temporary_database};
use crate::test_helpers::TestClock;
use chrono::TimeDelta;
use extmatrix::queue::{
    adapters::postgres::PostgresJobRepository,
    domain::{JobFunction, NewJob},
    ports::JobRepository,
    services::JobQueue,
};
use extmatrix::tag::Tag;
use mockable::Clock;
use rstest::rstest;

fn new_job(raw: &str, clock: &TestClock) -> Result<NewJob, BoxError> {
    Ok(NewJob::build(&Tag::parse(raw)?, clock))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn oldest_available_returns_jobs_in_insertion_order() -> Result<(), BoxError> {
    let Some(database) = temporary_database()? else {
        return Ok(());
    };
    let repo = PostgresJobRepository::new(database.pool());
    let clock = TestClock::default();

    let first = repo.insert(new_job("amqp:pecl@7.4.13-buster", &clock)?).await?;
    clock.advance(TimeDelta::seconds(1));
    repo.insert(new_job("amqp:dev@7.4.13-buster", &clock)?).await?;

    let oldest = repo.oldest_available(JobFunction::Build).await?;
    assert_eq!(oldest.map(|job| job.id()), Some(first.id()));
    assert_eq!(
        repo.find_by_id(first.id()).await?.map(|job| job.payload().tag.clone()),
        Some("amqp:pecl@7.4.13-buster".to_owned())
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn try_assign_grants_a_single_lease() -> Result<(), BoxError> {
    let Some(database) = temporary_database()? else {
        return Ok(());
    };
    let repo = PostgresJobRepository::new(database.pool());
    let clock = TestClock::default();
    let job = repo.insert(new_job("amqp:pecl@7.4.13-buster", &clock)?).await?;

    assert!(repo.try_assign(job.id(), clock.utc()).await?);
    assert!(!repo.try_assign(job.id(), clock.utc()).await?);
    assert!(repo.oldest_available(JobFunction::Build).await?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dangling_jobs_respect_the_cutoff() -> Result<(), BoxError> {
    let Some(database) = temporary_database()? else {
        return Ok(());
    };
    let repo = Arc::new(PostgresJobRepository::new(database.pool()));
    let clock = Arc::new(TestClock::default());
    let queue = JobQueue::new(Arc::clone(&repo), Arc::clone(&clock));
    queue.enqueue(&Tag::parse("amqp:pecl@7.4.13-buster")?).await?;
    let claimed = queue.claim_next().await?.ok_or("expected a job")?;

    clock.advance(TimeDelta::minutes(30));
    assert!(repo.find_dangling(clock.utc() - TimeDelta::hours(1)).await?.is_empty());

    clock.advance(TimeDelta::minutes(31));
    let dangling = repo.find_dangling(clock.utc() - TimeDelta::hours(1)).await?;
    assert_eq!(dangling.iter().map(|job| job.id()).collect::<Vec<_>>(), vec![claimed.id()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn counts_track_job_outcomes() -> Result<(), BoxError> {
    let Some(database) = temporary_database()? else {
        return Ok(());
    };
    let queue = JobQueue::new(
        Arc::new(PostgresJobRepository::new(database.pool())),
        Arc::new(TestClock::default()),
    );
    for raw in [
        "amqp:pecl@7.4.13-buster",
        "amqp:dev@7.4.13-buster",
        "amqp:dev@8.0.0-alpine",
    ] {
        queue.enqueue(&Tag::parse(raw)?).await?;
    }
    let mut passed = queue.claim_next().await?.ok_or("expected a job")?;
    queue.complete(&mut passed, false).await?;
    let mut failed = queue.claim_next().await?.ok_or("expected a job")?;
    queue.complete(&mut failed, true).await?;

    let counts = queue.counts().await?;
    assert_eq!(counts.total, 3);
    assert_eq!(counts.finished, 2);
    assert_eq!(counts.failed, 1);
    assert_eq!(counts.successful, 1);
    assert_eq!(counts.waiting(), 1);
    Ok(())
}
