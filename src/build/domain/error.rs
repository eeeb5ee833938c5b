//! Errors raised while assembling a build.

use thiserror::Error;

/// Errors raised while turning specs into a Dockerfile.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssemblerError {
    /// The extension's source lives in a system we cannot check out.
    #[error("Cannot handle \"{0}\" source type.")]
    UnsupportedSourceType(String),

    /// The Dockerfile template failed to render.
    #[error("failed to render Dockerfile: {0}")]
    Render(String),
}
