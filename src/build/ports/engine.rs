//! Container engine port used to build and clean up images.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for container engine operations.
pub type ContainerEngineResult<T> = Result<T, ContainerEngineError>;

/// One image build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Tag applied to the resulting image.
    pub image_tag: String,
    /// Dockerfile text.
    pub dockerfile: String,
}

/// Container engine contract.
#[async_trait]
pub trait ContainerEngine: Send + Sync {
    /// Builds an image, passing each output frame to `on_frame` in the order
    /// the engine produced it.
    ///
    /// A build that runs but fails is not an error: the failure shows up in
    /// the streamed output.
    async fn build_image(
        &self,
        request: &BuildRequest,
        on_frame: &mut (dyn for<'f> FnMut(&'f str) + Send),
    ) -> ContainerEngineResult<()>;

    /// Force-removes a container.
    async fn remove_container(&self, id: &str) -> ContainerEngineResult<()>;

    /// Force-removes an image.
    async fn remove_image(&self, id: &str) -> ContainerEngineResult<()>;
}

/// Errors returned by container engine adapters.
#[derive(Debug, Clone, Error)]
pub enum ContainerEngineError {
    /// The engine could not be started or talked to.
    #[error("failed to run container engine: {0}")]
    Spawn(Arc<std::io::Error>),

    /// The engine ran and reported a failure.
    #[error("container engine error: {0}")]
    Runtime(String),
}

impl ContainerEngineError {
    /// Wraps an I/O failure talking to the engine.
    #[must_use]
    pub fn spawn(err: std::io::Error) -> Self {
        Self::Spawn(Arc::new(err))
    }
}
