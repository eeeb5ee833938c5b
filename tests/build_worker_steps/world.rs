//! Shared world state for build worker BDD scenarios.

use std::sync::Arc;

use crate::spec_fixtures::fixture_registry;
use crate::test_helpers::TestClock;
use extmatrix::build::adapters::ScriptedContainerEngine;
use extmatrix::queue::{
    adapters::memory::InMemoryJobRepository,
    services::{JobQueue, TriggerError, TriggerService},
};
use extmatrix::spec::adapters::JsonSpecSource;
use extmatrix::status::{adapters::memory::InMemoryStatusRepository, services::StatusStore};
use extmatrix::worker::{
    BuildWorker, ShutdownSignal, WorkerConfig, WorkerDependencies, WorkerSummary,
};
use rstest::fixture;

/// Trigger type used by the BDD world.
pub type TestTrigger = TriggerService<JsonSpecSource, InMemoryJobRepository, TestClock>;

/// Scenario world for build worker behaviour tests.
pub struct BuildWorld {
    pub jobs: Arc<InMemoryJobRepository>,
    pub statuses: Arc<InMemoryStatusRepository>,
    pub engine: Arc<ScriptedContainerEngine>,
    pub clock: Arc<TestClock>,
    pub last_trigger_error: Option<TriggerError>,
    pub last_summary: Option<WorkerSummary>,
}

impl BuildWorld {
    /// Creates a world with empty adapters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(InMemoryJobRepository::new()),
            statuses: Arc::new(InMemoryStatusRepository::new()),
            engine: Arc::new(ScriptedContainerEngine::new()),
            clock: Arc::new(TestClock::default()),
            last_trigger_error: None,
            last_summary: None,
        }
    }

    /// Returns a queue over the world's job repository.
    pub fn queue(&self) -> JobQueue<InMemoryJobRepository, TestClock> {
        JobQueue::new(Arc::clone(&self.jobs), Arc::clone(&self.clock))
    }

    /// Returns a trigger over the fixture spec documents.
    pub fn trigger(&self) -> eyre::Result<TestTrigger> {
        Ok(TriggerService::new(fixture_registry()?, self.queue()))
    }

    /// Returns a status store over the world's status repository.
    pub fn store(&self) -> StatusStore<InMemoryStatusRepository, TestClock> {
        StatusStore::new(Arc::clone(&self.statuses), Arc::clone(&self.clock))
    }

    /// Returns a worker that drains the queue once.
    pub fn worker(
        &self,
    ) -> eyre::Result<
        BuildWorker<
            InMemoryJobRepository,
            InMemoryStatusRepository,
            JsonSpecSource,
            ScriptedContainerEngine,
            TestClock,
        >,
    > {
        Ok(BuildWorker::new(
            WorkerDependencies {
                jobs: Arc::clone(&self.jobs),
                statuses: Arc::clone(&self.statuses),
                specs: fixture_registry()?,
                engine: Arc::clone(&self.engine),
                clock: Arc::clone(&self.clock),
            },
            WorkerConfig::new(),
            ShutdownSignal::new(),
        ))
    }
}

impl Default for BuildWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BuildWorld {
    BuildWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
