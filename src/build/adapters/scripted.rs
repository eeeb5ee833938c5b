//! Scripted container engine for tests and dry runs.

use crate::build::ports::{
    BuildRequest, ContainerEngine, ContainerEngineError, ContainerEngineResult,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

/// Container engine that replays prepared output instead of building.
///
/// Each build consumes the next scripted frame list; once the script runs
/// out, the default frames are replayed. Every request and removal is
/// recorded for inspection.
#[derive(Debug, Clone, Default)]
pub struct ScriptedContainerEngine {
    state: Arc<RwLock<ScriptedState>>,
}

#[derive(Debug, Default)]
struct ScriptedState {
    script: VecDeque<ScriptedBuild>,
    default_frames: Vec<String>,
    fail_removals: bool,
    builds: Vec<BuildRequest>,
    removed_containers: Vec<String>,
    removed_images: Vec<String>,
}

#[derive(Debug)]
enum ScriptedBuild {
    Frames(Vec<String>),
    Error(String),
}

fn poisoned(err: &dyn std::fmt::Display) -> ContainerEngineError {
    ContainerEngineError::Runtime(format!("scripted engine lock poisoned: {err}"))
}

impl ScriptedContainerEngine {
    /// Creates an engine whose builds produce no output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the frames replayed once the script is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerEngineError::Runtime`] when the lock is poisoned.
    pub fn set_default_frames<I, S>(&self, frames: I) -> ContainerEngineResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.default_frames = frames.into_iter().map(Into::into).collect();
        Ok(())
    }

    /// Queues the frames of the next build.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerEngineError::Runtime`] when the lock is poisoned.
    pub fn push_build<I, S>(&self, frames: I) -> ContainerEngineResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state
            .script
            .push_back(ScriptedBuild::Frames(frames.into_iter().map(Into::into).collect()));
        Ok(())
    }

    /// Makes the next build fail with a runtime error.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerEngineError::Runtime`] when the lock is poisoned.
    pub fn push_failure(&self, message: impl Into<String>) -> ContainerEngineResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.script.push_back(ScriptedBuild::Error(message.into()));
        Ok(())
    }

    /// Makes every removal fail.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerEngineError::Runtime`] when the lock is poisoned.
    pub fn fail_removals(&self) -> ContainerEngineResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state.fail_removals = true;
        Ok(())
    }

    /// Returns every build request received so far.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerEngineError::Runtime`] when the lock is poisoned.
    pub fn builds(&self) -> ContainerEngineResult<Vec<BuildRequest>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.builds.clone())
    }

    /// Returns the containers removed so far.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerEngineError::Runtime`] when the lock is poisoned.
    pub fn removed_containers(&self) -> ContainerEngineResult<Vec<String>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.removed_containers.clone())
    }

    /// Returns the images removed so far.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerEngineError::Runtime`] when the lock is poisoned.
    pub fn removed_images(&self) -> ContainerEngineResult<Vec<String>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.removed_images.clone())
    }

    fn record_removal(&self, id: &str, image: bool) -> ContainerEngineResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        if state.fail_removals {
            return Err(ContainerEngineError::Runtime(format!("no such object: {id}")));
        }
        if image {
            state.removed_images.push(id.to_owned());
        } else {
            state.removed_containers.push(id.to_owned());
        }
        Ok(())
    }
}

#[async_trait]
impl ContainerEngine for ScriptedContainerEngine {
    async fn build_image(
        &self,
        request: &BuildRequest,
        on_frame: &mut (dyn for<'f> FnMut(&'f str) + Send),
    ) -> ContainerEngineResult<()> {
        let next = {
            let mut state = self.state.write().map_err(|err| poisoned(&err))?;
            state.builds.push(request.clone());
            let scripted = state.script.pop_front();
            scripted.unwrap_or_else(|| ScriptedBuild::Frames(state.default_frames.clone()))
        };
        match next {
            ScriptedBuild::Frames(frames) => {
                for frame in &frames {
                    on_frame(frame);
                }
                Ok(())
            }
            ScriptedBuild::Error(message) => Err(ContainerEngineError::Runtime(message)),
        }
    }

    async fn remove_container(&self, id: &str) -> ContainerEngineResult<()> {
        self.record_removal(id, false)
    }

    async fn remove_image(&self, id: &str) -> ContainerEngineResult<()> {
        self.record_removal(id, true)
    }
}
