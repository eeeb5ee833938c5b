//! Shared fixtures for the in-memory integration tests.

use std::sync::Arc;

use crate::spec_fixtures::fixture_registry;
use crate::test_helpers::TestClock;
use extmatrix::build::adapters::ScriptedContainerEngine;
use extmatrix::queue::{
    adapters::memory::InMemoryJobRepository,
    services::{DanglingJobSweeper, JobQueue, TriggerService},
};
use extmatrix::spec::adapters::JsonSpecSource;
use extmatrix::status::{adapters::memory::InMemoryStatusRepository, services::StatusStore};
use extmatrix::worker::{BuildWorker, ShutdownSignal, WorkerConfig, WorkerDependencies};
use rstest::fixture;

/// Worker type wired to in-memory adapters.
pub type TestWorker = BuildWorker<
    InMemoryJobRepository,
    InMemoryStatusRepository,
    JsonSpecSource,
    ScriptedContainerEngine,
    TestClock,
>;

/// In-memory adapters shared by every service in a test.
pub struct Pipeline {
    pub jobs: Arc<InMemoryJobRepository>,
    pub statuses: Arc<InMemoryStatusRepository>,
    pub engine: Arc<ScriptedContainerEngine>,
    pub clock: Arc<TestClock>,
}

impl Pipeline {
    /// Returns a trigger over the fixture spec documents.
    pub fn trigger(&self) -> TriggerService<JsonSpecSource, InMemoryJobRepository, TestClock> {
        let registry = fixture_registry().expect("fixture registry opens");
        TriggerService::new(registry, self.queue())
    }

    /// Returns a queue over the shared job repository.
    pub fn queue(&self) -> JobQueue<InMemoryJobRepository, TestClock> {
        JobQueue::new(Arc::clone(&self.jobs), Arc::clone(&self.clock))
    }

    /// Returns a status store over the shared status repository.
    pub fn store(&self) -> StatusStore<InMemoryStatusRepository, TestClock> {
        StatusStore::new(Arc::clone(&self.statuses), Arc::clone(&self.clock))
    }

    /// Returns a sweeper over the shared repositories.
    pub fn sweeper(
        &self,
    ) -> DanglingJobSweeper<InMemoryJobRepository, InMemoryStatusRepository, TestClock> {
        DanglingJobSweeper::new(
            Arc::clone(&self.jobs),
            Arc::clone(&self.statuses),
            Arc::clone(&self.clock),
        )
    }

    /// Returns a worker that drains the queue once.
    pub fn worker(&self, config: WorkerConfig) -> TestWorker {
        BuildWorker::new(
            WorkerDependencies {
                jobs: Arc::clone(&self.jobs),
                statuses: Arc::clone(&self.statuses),
                specs: fixture_registry().expect("fixture registry opens"),
                engine: Arc::clone(&self.engine),
                clock: Arc::clone(&self.clock),
            },
            config,
            ShutdownSignal::new(),
        )
    }
}

/// Provides fresh in-memory adapters for each test.
#[fixture]
pub fn pipeline() -> Pipeline {
    Pipeline {
        jobs: Arc::new(InMemoryJobRepository::new()),
        statuses: Arc::new(InMemoryStatusRepository::new()),
        engine: Arc::new(ScriptedContainerEngine::new()),
        clock: Arc::new(TestClock::default()),
    }
}
