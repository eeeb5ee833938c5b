//! Dangling job reclamation against a crashed worker.

use super::helpers::{Pipeline, pipeline};
use chrono::TimeDelta;
use extmatrix::queue::services::{DANGLING_BUILD_MESSAGE, DEFAULT_LEASE_TIMEOUT};
use extmatrix::status::domain::StatusLabel;
use extmatrix::tag::Tag;
use mockable::Clock;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expired_lease_fails_job_and_status(pipeline: Pipeline) {
    pipeline
        .trigger()
        .enqueue_pattern("amqp:pecl@7.4.13-buster")
        .await
        .expect("pattern enqueues");
    let claimed = pipeline
        .queue()
        .claim_next()
        .await
        .expect("claim")
        .expect("job available");
    assert_eq!(claimed.updated_at(), pipeline.clock.utc());

    pipeline.clock.advance(TimeDelta::minutes(90));
    let reclaimed = pipeline
        .sweeper()
        .sweep(DEFAULT_LEASE_TIMEOUT)
        .await
        .expect("sweep");

    assert_eq!(reclaimed, 1);
    let counts = pipeline.queue().counts().await.expect("counts");
    assert_eq!((counts.finished, counts.failed), (1, 1));
    let tag = Tag::parse("amqp:pecl@7.4.13-buster").expect("valid tag");
    let status = pipeline
        .store()
        .find(&tag)
        .await
        .expect("lookup")
        .expect("status exists");
    assert_eq!(status.label(), StatusLabel::Fail);
    assert_eq!(status.log(), Some(DANGLING_BUILD_MESSAGE));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn live_lease_is_left_alone(pipeline: Pipeline) {
    pipeline
        .trigger()
        .enqueue_pattern("amqp:pecl@7.4.13-buster")
        .await
        .expect("pattern enqueues");
    pipeline.queue().claim_next().await.expect("claim");

    pipeline.clock.advance(TimeDelta::minutes(59));
    let reclaimed = pipeline
        .sweeper()
        .sweep(DEFAULT_LEASE_TIMEOUT)
        .await
        .expect("sweep");

    assert_eq!(reclaimed, 0);
    let counts = pipeline.queue().counts().await.expect("counts");
    assert_eq!(counts.assigned, 1);
}
