//! Container engine backed by the `docker` command line.

use crate::build::ports::{
    BuildRequest, ContainerEngine, ContainerEngineError, ContainerEngineResult,
};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::debug;

const DEFAULT_PROGRAM: &str = "docker";

/// Drives the classic Docker builder through the CLI.
///
/// `DOCKER_BUILDKIT=0` keeps the output in the format the build log
/// scanner expects.
#[derive(Debug, Clone)]
pub struct DockerCliEngine {
    program: String,
}

impl Default for DockerCliEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DockerCliEngine {
    /// Creates an engine that runs `docker` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Creates an engine that runs the given executable.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn force_remove(&self, subcommand: &str, id: &str) -> ContainerEngineResult<()> {
        let output = Command::new(&self.program)
            .args([subcommand, "--force", id])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(ContainerEngineError::spawn)?;
        if output.status.success() {
            return Ok(());
        }
        Err(ContainerEngineError::Runtime(format!(
            "{} {subcommand} {id} exited with {}: {}",
            self.program,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}

#[async_trait]
impl ContainerEngine for DockerCliEngine {
    async fn build_image(
        &self,
        request: &BuildRequest,
        on_frame: &mut (dyn for<'f> FnMut(&'f str) + Send),
    ) -> ContainerEngineResult<()> {
        let mut child = Command::new(&self.program)
            .args(["build", "--tag", &request.image_tag, "-"])
            .env("DOCKER_BUILDKIT", "0")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(ContainerEngineError::spawn)?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ContainerEngineError::Runtime("stdin unavailable".to_owned()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ContainerEngineError::Runtime("stdout unavailable".to_owned()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| ContainerEngineError::Runtime("stderr unavailable".to_owned()))?;

        stdin
            .write_all(request.dockerfile.as_bytes())
            .await
            .map_err(ContainerEngineError::spawn)?;
        drop(stdin);

        let mut out_lines = BufReader::new(stdout).lines();
        let mut err_lines = BufReader::new(stderr).lines();
        let mut out_open = true;
        let mut err_open = true;
        while out_open || err_open {
            // Both readers are cancel safe; stderr wins when both are ready.
            let (line, open) = tokio::select! {
                biased;
                line = err_lines.next_line(), if err_open => (line, &mut err_open),
                line = out_lines.next_line(), if out_open => (line, &mut out_open),
            };
            let Some(frame) = line.map_err(ContainerEngineError::spawn)? else {
                *open = false;
                continue;
            };
            on_frame(&frame);
        }

        let status = child.wait().await.map_err(ContainerEngineError::spawn)?;
        debug!(image = %request.image_tag, %status, "docker build exited");
        Ok(())
    }

    async fn remove_container(&self, id: &str) -> ContainerEngineResult<()> {
        self.force_remove("rm", id).await
    }

    async fn remove_image(&self, id: &str) -> ContainerEngineResult<()> {
        self.force_remove("rmi", id).await
    }
}
