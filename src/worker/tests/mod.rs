//! Unit tests for the build worker.


use std::sync::Arc;

use crate::build::adapters::ScriptedContainerEngine;
use crate::queue::{
    adapters::memory::InMemoryJobRepository,
    domain::{Job, JobId},
    ports::JobRepository,
    services::JobQueue,
};
use crate::spec::{
    adapters::InMemorySpecSource,
    domain::{BuildDocument, DependencyDocument, ExtensionDocument, OperatingSystemDocument},
    services::SpecRegistry,
};
use crate::status::{
    adapters::memory::InMemoryStatusRepository, domain::BuildStatus, ports::StatusRepository,
};
use crate::tag::Tag;
use crate::test_support::ManualClock;
use crate::worker::{BuildWorker, ShutdownSignal, WorkerConfig, WorkerDependencies};

pub(super) const PASSING_BUILD: [&str; 3] = [
    "Step 1/4 : FROM php:7.4.13-buster",
    " ---> 0123456789ab",
    "Successfully built fedcba987654",
];

pub(super) const FAILING_BUILD: [&str; 2] = [
    " ---> Running in abcdef012345",
    "make: *** [Makefile:196: test] Error 1",
];

pub(super) type TestWorker = BuildWorker<
    InMemoryJobRepository,
    InMemoryStatusRepository,
    InMemorySpecSource,
    ScriptedContainerEngine,
    ManualClock,
>;

pub(super) fn specs() -> SpecRegistry<InMemorySpecSource> {
    let git = |url: &str| BuildDocument {
        source_type: "git".to_owned(),
        url: url.to_owned(),
        ..BuildDocument::default()
    };
    let source = InMemorySpecSource::new()
        .with_extension(
            "amqp",
            ExtensionDocument {
                build: git("https://github.com/php-amqp/php-amqp"),
                ..ExtensionDocument::default()
            },
        )
        .with_extension(
            "ahocorasick",
            ExtensionDocument {
                pecl: false,
                build: git("https://github.com/ph4r05/php_aho_corasick"),
                ..ExtensionDocument::default()
            },
        )
        .with_extension(
            "mercurial",
            ExtensionDocument {
                build: BuildDocument {
                    source_type: "hg".to_owned(),
                    url: "https://hg.example.invalid/ext".to_owned(),
                    ..BuildDocument::default()
                },
                ..ExtensionDocument::default()
            },
        )
        .with_operating_system(
            "buster",
            OperatingSystemDocument {
                pre: vec!["apt update".to_owned()],
                deps: DependencyDocument {
                    cmd: "apt install -y".to_owned(),
                    list: vec!["git".to_owned()],
                },
                ..OperatingSystemDocument::default()
            },
        )
        .with_php_versions(["7.4.13"]);
    SpecRegistry::new(Arc::new(source))
}

pub(super) struct Harness {
    pub(super) jobs: Arc<InMemoryJobRepository>,
    pub(super) statuses: Arc<InMemoryStatusRepository>,
    pub(super) engine: ScriptedContainerEngine,
    pub(super) clock: Arc<ManualClock>,
}

impl Harness {
    pub(super) fn new() -> Self {
        Self {
            jobs: Arc::new(InMemoryJobRepository::new()),
            statuses: Arc::new(InMemoryStatusRepository::new()),
            engine: ScriptedContainerEngine::new(),
            clock: Arc::new(ManualClock::default()),
        }
    }

    pub(super) async fn enqueue(&self, tag: &str) -> Job {
        JobQueue::new(Arc::clone(&self.jobs), Arc::clone(&self.clock))
            .enqueue(&Tag::parse(tag).expect("valid tag"))
            .await
            .expect("enqueue should succeed")
    }

    pub(super) fn worker(&self, config: WorkerConfig) -> TestWorker {
        self.worker_with_shutdown(config, ShutdownSignal::new())
    }

    pub(super) fn worker_with_shutdown(
        &self,
        config: WorkerConfig,
        shutdown: ShutdownSignal,
    ) -> TestWorker {
        BuildWorker::new(
            WorkerDependencies {
                jobs: Arc::clone(&self.jobs),
                statuses: Arc::clone(&self.statuses),
                specs: specs(),
                engine: Arc::new(self.engine.clone()),
                clock: Arc::clone(&self.clock),
            },
            config,
            shutdown,
        )
    }

    pub(super) async fn job(&self, id: JobId) -> Job {
        self.jobs
            .find_by_id(id)
            .await
            .expect("lookup should succeed")
            .expect("job should exist")
    }

    pub(super) async fn status(&self, tag: &str) -> BuildStatus {
        self.statuses
            .find(&Tag::parse(tag).expect("valid tag"))
            .await
            .expect("lookup should succeed")
            .expect("status should exist")
    }
}
