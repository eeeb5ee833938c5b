//! Status repository behaviour against `PostgreSQL`.

use super::helpers::{BoxError, temporary_database};
use crate::test_helpers::TestClock;
use extmatrix::status::{
    adapters::postgres::PostgresStatusRepository,
    domain::{BuildRecord, BuildStatus, StatusLabel},
    ports::StatusRepository,
};
use extmatrix::tag::Tag;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn save_upserts_and_preserves_artifacts() -> Result<(), BoxError> {
    let Some(database) = temporary_database()? else {
        return Ok(());
    };
    let repo = PostgresStatusRepository::new(database.pool());
    let clock = TestClock::default();
    let tag = Tag::parse("amqp:pecl@7.4.13-buster")?;

    let mut status = BuildStatus::new(tag.clone(), &clock);
    repo.save(&status).await?;
    status.record_build(
        BuildRecord {
            dockerfile: "FROM php:7.4.13-buster".to_owned(),
            log: "Successfully built fedcba987654".to_owned(),
            build_time_secs: 97,
            passed: true,
        },
        &clock,
    );
    repo.save(&status).await?;

    let stored = repo.find(&tag).await?.ok_or("expected a status")?;
    assert_eq!(stored, status);
    assert_eq!(stored.label(), StatusLabel::Pass);
    assert_eq!(stored.build_time_secs(), 97);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_orders_by_tag() -> Result<(), BoxError> {
    let Some(database) = temporary_database()? else {
        return Ok(());
    };
    let repo = PostgresStatusRepository::new(database.pool());
    let clock = TestClock::default();
    for raw in ["amqp:pecl@7.4.13-buster", "ahocorasick:dev@8.0.0-alpine"] {
        repo.save(&BuildStatus::new(Tag::parse(raw)?, &clock)).await?;
    }

    let tags: Vec<String> = repo
        .list()
        .await?
        .iter()
        .map(|status| status.tag().to_string())
        .collect();
    assert_eq!(
        tags,
        vec!["ahocorasick:dev@8.0.0-alpine", "amqp:pecl@7.4.13-buster"]
    );
    assert!(repo.find(&Tag::parse("amqp:dev@8.0.0-alpine")?).await?.is_none());
    Ok(())
}
