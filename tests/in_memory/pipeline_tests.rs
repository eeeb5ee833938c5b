//! Trigger to status flows over the fixture spec documents.

use super::helpers::{Pipeline, pipeline};
use crate::spec_fixtures::{FAILING_BUILD, PASSING_BUILD};
use extmatrix::build::domain::CompatibilityGate;
use extmatrix::status::domain::StatusLabel;
use extmatrix::tag::Tag;
use extmatrix::worker::WorkerConfig;
use rstest::rstest;

fn tag(raw: &str) -> Tag {
    Tag::parse(raw).expect("valid tag")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_matrix_covers_enabled_entries(pipeline: Pipeline) {
    let created = pipeline
        .trigger()
        .enqueue_build_matrix()
        .await
        .expect("matrix enqueues");

    // ahocorasick and amqp, two channels, three releases with their zts
    // variants, alpine and buster.
    assert_eq!(created.len(), 48);
    assert!(
        created
            .iter()
            .all(|job| !job.payload().tag.starts_with("svn:"))
    );
    let counts = pipeline.queue().counts().await.expect("counts");
    assert_eq!(counts.waiting(), 48);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn worker_builds_enqueued_tags(pipeline: Pipeline) {
    pipeline
        .engine
        .set_default_frames(PASSING_BUILD)
        .expect("engine scripts");
    pipeline
        .trigger()
        .enqueue_pattern("amqp:pecl@7.4.13-*")
        .await
        .expect("pattern enqueues");

    let summary = pipeline
        .worker(WorkerConfig::new())
        .run()
        .await
        .expect("worker runs");

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.passed, 2);
    let store = pipeline.store();
    for raw in ["amqp:pecl@7.4.13-alpine", "amqp:pecl@7.4.13-buster"] {
        let status = store
            .find(&tag(raw))
            .await
            .expect("lookup")
            .expect("status exists");
        assert_eq!(status.label(), StatusLabel::Pass);
        assert!(
            status
                .file()
                .is_some_and(|file| file.starts_with("FROM php:7.4.13-"))
        );
    }
    let counts = pipeline.queue().counts().await.expect("counts");
    assert_eq!((counts.finished, counts.failed), (2, 0));
    let images = pipeline.engine.removed_images().expect("removals");
    assert_eq!(images, vec!["fedcba987654", "fedcba987654"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_build_marks_job_and_status(pipeline: Pipeline) {
    pipeline
        .engine
        .push_build(FAILING_BUILD)
        .expect("engine scripts");
    pipeline
        .trigger()
        .enqueue_pattern("amqp:dev@8.0.0-buster")
        .await
        .expect("pattern enqueues");

    let summary = pipeline
        .worker(WorkerConfig::new())
        .run()
        .await
        .expect("worker runs");

    assert_eq!(summary.failed, 1);
    let status = pipeline
        .store()
        .find(&tag("amqp:dev@8.0.0-buster"))
        .await
        .expect("lookup")
        .expect("status exists");
    assert_eq!(status.label(), StatusLabel::Fail);
    assert!(
        status
            .log()
            .is_some_and(|log| log.ends_with("librabbitmq not found"))
    );
    let counts = pipeline.queue().counts().await.expect("counts");
    assert_eq!(counts.failed, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn worker_limit_leaves_remaining_jobs(pipeline: Pipeline) {
    pipeline
        .engine
        .set_default_frames(PASSING_BUILD)
        .expect("engine scripts");
    pipeline
        .trigger()
        .enqueue_pattern("ahocorasick:*@7.3.25-*")
        .await
        .expect("pattern enqueues");

    let summary = pipeline
        .worker(WorkerConfig::new().with_limit(Some(3)))
        .run()
        .await
        .expect("worker runs");

    assert_eq!(summary.processed, 3);
    let counts = pipeline.queue().counts().await.expect("counts");
    assert_eq!(counts.waiting(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn disabled_version_checks_build_everything(pipeline: Pipeline) {
    pipeline
        .engine
        .set_default_frames(PASSING_BUILD)
        .expect("engine scripts");
    pipeline
        .trigger()
        .enqueue_pattern("amqp:pecl@*-alpine")
        .await
        .expect("pattern enqueues");

    let config = WorkerConfig::new().with_gate(CompatibilityGate::new(false, false));
    let summary = pipeline.worker(config).run().await.expect("worker runs");

    assert_eq!((summary.passed, summary.skipped), (6, 0));
    assert_eq!(pipeline.engine.builds().expect("builds").len(), 6);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_extension_enqueues_nothing(pipeline: Pipeline) {
    let result = pipeline.trigger().enqueue_pattern("svn:*@*-*").await;

    assert!(result.is_err());
    let counts = pipeline.queue().counts().await.expect("counts");
    assert_eq!(counts.total, 0);
}
