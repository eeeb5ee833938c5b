//! Build worker service.

use super::{ShutdownSignal, WorkerConfig};
use crate::build::{
    domain::{AssemblerError, BuildContext, GateDecision},
    ports::ContainerEngine,
    services::{BuildError, BuildExecutor},
};
use crate::queue::{
    domain::Job,
    ports::JobRepository,
    services::{JobQueue, QueueError},
};
use crate::spec::{
    ports::{SpecError, SpecSource},
    services::SpecRegistry,
};
use crate::status::{
    domain::BuildStatus,
    ports::{StatusRepository, StatusRepositoryError},
    services::StatusStore,
};
use crate::tag::TagError;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{Instrument, error, info, info_span, warn};

/// Errors that stop the worker loop.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// Claiming or completing a job failed.
    #[error(transparent)]
    Queue(#[from] QueueError),
    /// A job's final status could not be stored.
    #[error(transparent)]
    Status(#[from] StatusRepositoryError),
}

/// Result type for worker operations.
pub type WorkerResult<T> = Result<T, WorkerError>;

/// Failures inside one job; recorded on its status instead of stopping the
/// loop.
#[derive(Debug, Error)]
enum JobError {
    #[error(transparent)]
    Tag(#[from] TagError),
    #[error(transparent)]
    Spec(#[from] SpecError),
    #[error(transparent)]
    Status(#[from] StatusRepositoryError),
    #[error(transparent)]
    Assembler(#[from] AssemblerError),
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Terminal outcome of one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    /// The gate excluded the tag.
    Skipped,
    /// The image built and its tests passed.
    Passed,
    /// The build failed or the job could not be processed.
    Failed,
}

/// Totals of one worker run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerSummary {
    /// Jobs claimed and finalised.
    pub processed: u32,
    /// Jobs that passed.
    pub passed: u32,
    /// Jobs that failed.
    pub failed: u32,
    /// Jobs the gate skipped.
    pub skipped: u32,
    /// Whether the run stopped because of a shutdown request.
    pub interrupted: bool,
}

impl WorkerSummary {
    fn record(&mut self, outcome: JobOutcome) {
        self.processed = self.processed.saturating_add(1);
        let counter = match outcome {
            JobOutcome::Skipped => &mut self.skipped,
            JobOutcome::Passed => &mut self.passed,
            JobOutcome::Failed => &mut self.failed,
        };
        *counter = counter.saturating_add(1);
    }
}

/// Collaborators of a [`BuildWorker`].
pub struct WorkerDependencies<J, S, X, E, C>
where
    J: JobRepository,
    S: StatusRepository,
    X: SpecSource,
    E: ContainerEngine,
    C: Clock + Send + Sync,
{
    /// Job storage.
    pub jobs: Arc<J>,
    /// Status storage.
    pub statuses: Arc<S>,
    /// Extension and OS specs.
    pub specs: SpecRegistry<X>,
    /// Container engine used for builds.
    pub engine: Arc<E>,
    /// Time source.
    pub clock: Arc<C>,
}

/// Single-threaded build worker.
pub struct BuildWorker<J, S, X, E, C>
where
    J: JobRepository,
    S: StatusRepository,
    X: SpecSource,
    E: ContainerEngine,
    C: Clock + Send + Sync,
{
    queue: JobQueue<J, C>,
    statuses: StatusStore<S, C>,
    specs: SpecRegistry<X>,
    executor: BuildExecutor<E, C>,
    clock: Arc<C>,
    config: WorkerConfig,
    shutdown: ShutdownSignal,
}

impl<J, S, X, E, C> BuildWorker<J, S, X, E, C>
where
    J: JobRepository,
    S: StatusRepository,
    X: SpecSource,
    E: ContainerEngine,
    C: Clock + Send + Sync,
{
    /// Creates a worker.
    #[must_use]
    pub fn new(
        dependencies: WorkerDependencies<J, S, X, E, C>,
        config: WorkerConfig,
        shutdown: ShutdownSignal,
    ) -> Self {
        let WorkerDependencies {
            jobs,
            statuses,
            specs,
            engine,
            clock,
        } = dependencies;
        Self {
            queue: JobQueue::new(jobs, Arc::clone(&clock)),
            statuses: StatusStore::new(statuses, Arc::clone(&clock)),
            specs,
            executor: BuildExecutor::new(engine, Arc::clone(&clock)),
            clock,
            config,
            shutdown,
        }
    }

    /// Runs jobs until the limit is reached, the queue is empty outside
    /// live mode, or shutdown is requested.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError`] when the queue cannot be read or written, or
    /// when a job's final status cannot be stored.
    pub async fn run(&self) -> WorkerResult<WorkerSummary> {
        let mut remaining = self.config.limit();
        let mut summary = WorkerSummary::default();
        info!(
            limit = ?remaining,
            live = self.config.is_live(),
            "worker started"
        );

        loop {
            if self.shutdown.is_triggered() {
                info!("interrupted by signal");
                summary.interrupted = true;
                break;
            }
            if remaining == Some(0) {
                info!("job limit reached");
                break;
            }

            let Some(mut job) = self.queue.claim_next().await? else {
                info!("no available jobs");
                if !self.config.is_live() {
                    break;
                }
                if !self.shutdown.sleep(self.config.sleep()).await {
                    summary.interrupted = true;
                    break;
                }
                continue;
            };

            if let Some(left) = remaining.as_mut() {
                *left = left.saturating_sub(1);
            }

            let span = info_span!("job", job_id = %job.id(), tag = %job.payload().tag);
            let outcome = self.process(&mut job).instrument(span).await?;
            summary.record(outcome);
        }

        info!(
            processed = summary.processed,
            passed = summary.passed,
            failed = summary.failed,
            skipped = summary.skipped,
            "worker stopped"
        );
        Ok(summary)
    }

    /// Processes one claimed job and finalises it.
    ///
    /// The job is always marked finished, and the status is always saved
    /// once it has been opened, whatever happens in between.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError`] when finalisation itself fails.
    pub async fn process(&self, job: &mut Job) -> WorkerResult<JobOutcome> {
        let mut status = None;
        let result = self.run_job(job, &mut status).await;
        let outcome = result.unwrap_or_else(|err| {
            error!(error = %err, "job failed");
            if let Some(open) = status.as_mut() {
                open.record_failure(err.to_string(), &*self.clock);
            }
            JobOutcome::Failed
        });

        let mut saved = Ok(());
        if let Some(open) = status.as_ref() {
            saved = self.statuses.save(open).await;
        }
        self.queue
            .complete(job, outcome == JobOutcome::Failed)
            .await?;
        saved?;

        info!(?outcome, "job finished");
        Ok(outcome)
    }

    async fn run_job(
        &self,
        job: &Job,
        slot: &mut Option<BuildStatus>,
    ) -> Result<JobOutcome, JobError> {
        let tag = job.payload().to_tag()?;
        let status = slot.insert(self.statuses.open(&tag).await?);
        let extension = self.specs.extension(tag.extension())?;
        let os = self.specs.operating_system(tag.os())?;

        if let GateDecision::Skip(reason) = self.config.gate().evaluate(&tag, &extension) {
            warn!(%reason, "skipping job");
            status.record_skip(reason.to_string(), &*self.clock);
            return Ok(JobOutcome::Skipped);
        }

        let context = BuildContext::assemble(&tag, &extension, &os)?;
        let report = self.executor.execute(&context).await?;
        let outcome = if report.passed() {
            JobOutcome::Passed
        } else {
            JobOutcome::Failed
        };
        status.record_build(report.into(), &*self.clock);
        Ok(outcome)
    }
}
