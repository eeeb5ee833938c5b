//! Adapter implementations for the container engine port.

pub mod docker_cli;
pub mod scripted;

pub use docker_cli::DockerCliEngine;
pub use scripted::ScriptedContainerEngine;
