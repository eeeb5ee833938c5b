//! Build executor: renders, builds and cleans up one image.

use crate::build::{
    domain::{AssemblerError, BuildContext, BuildLogScanner},
    ports::{BuildRequest, ContainerEngine, ContainerEngineError},
};
use crate::status::domain::BuildRecord;
use chrono::TimeDelta;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised while running a build.
#[derive(Debug, Clone, Error)]
pub enum BuildError {
    /// The build could not be assembled.
    #[error(transparent)]
    Assembler(#[from] AssemblerError),
    /// The container engine failed outright.
    #[error(transparent)]
    Engine(#[from] ContainerEngineError),
}

/// Result type for build operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// Whether the image built and its tests passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The last output line reported success.
    Passed,
    /// Anything else.
    Failed,
}

/// Artifacts of one finished build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Rendered Dockerfile.
    pub dockerfile: String,
    /// Trimmed, non-empty output lines joined by newlines.
    pub log: String,
    /// Build time rounded up to whole seconds.
    pub build_time_secs: u32,
    /// Pass or fail.
    pub outcome: BuildOutcome,
}

impl BuildReport {
    /// Returns `true` when the build passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome == BuildOutcome::Passed
    }
}

impl From<BuildReport> for BuildRecord {
    fn from(report: BuildReport) -> Self {
        let passed = report.passed();
        Self {
            dockerfile: report.dockerfile,
            log: report.log,
            build_time_secs: report.build_time_secs,
            passed,
        }
    }
}

/// Runs builds through a container engine.
pub struct BuildExecutor<E, C>
where
    E: ContainerEngine,
    C: Clock + Send + Sync,
{
    engine: Arc<E>,
    clock: Arc<C>,
}

impl<E, C> BuildExecutor<E, C>
where
    E: ContainerEngine,
    C: Clock + Send + Sync,
{
    /// Creates an executor over `engine`.
    #[must_use]
    pub const fn new(engine: Arc<E>, clock: Arc<C>) -> Self {
        Self { engine, clock }
    }

    /// Builds `context` and reports the outcome.
    ///
    /// The intermediate container and the last image seen in the output are
    /// removed afterwards; removal failures are logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Assembler`] when the Dockerfile cannot be
    /// rendered and [`BuildError::Engine`] when the engine cannot run the
    /// build at all.
    pub async fn execute(&self, context: &BuildContext) -> BuildResult<BuildReport> {
        let dockerfile = context.render()?;
        let request = BuildRequest {
            image_tag: context.image_tag().to_owned(),
            dockerfile,
        };

        let mut scanner = BuildLogScanner::new();
        let started = self.clock.utc();
        info!(image = %request.image_tag, "building image");
        let built = {
            let mut on_frame = |frame: &str| {
                debug!(frame, "build output");
                scanner.scan(frame);
            };
            self.engine.build_image(&request, &mut on_frame).await
        };
        let elapsed = self.clock.utc() - started;

        self.clean_up(&scanner).await;
        built?;

        let outcome = if scanner.passed() {
            BuildOutcome::Passed
        } else {
            BuildOutcome::Failed
        };
        info!(image = %request.image_tag, ?outcome, "build finished");
        Ok(BuildReport {
            dockerfile: request.dockerfile,
            log: scanner.log(),
            build_time_secs: whole_seconds(elapsed),
            outcome,
        })
    }

    async fn clean_up(&self, scanner: &BuildLogScanner) {
        if let Some(id) = scanner.container_id() {
            match self.engine.remove_container(id).await {
                Ok(()) => debug!(container = id, "removed container"),
                Err(err) => warn!(container = id, error = %err, "failed to remove container"),
            }
        }
        if let Some(id) = scanner.image_id() {
            match self.engine.remove_image(id).await {
                Ok(()) => debug!(image = id, "removed image"),
                Err(err) => warn!(image = id, error = %err, "failed to remove image"),
            }
        }
    }
}

fn whole_seconds(elapsed: TimeDelta) -> u32 {
    let seconds = elapsed.num_seconds() + i64::from(elapsed.subsec_nanos() > 0);
    u32::try_from(seconds.max(0)).unwrap_or(u32::MAX)
}
