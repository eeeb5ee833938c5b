//! Domain model for gating, assembling and scanning builds.

mod context;
mod dockerfile;
mod error;
mod gate;
mod log;

pub use context::{BASE_WORKDIR, BuildContext};
pub use dockerfile::{CommandBlock, DockerfileAssembler, SOURCE_DIR};
pub use error::AssemblerError;
pub use gate::{CompatibilityGate, GateDecision, SkipReason};
pub use log::BuildLogScanner;
