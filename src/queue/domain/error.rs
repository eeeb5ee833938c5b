//! Error types for job domain parsing.

use thiserror::Error;

/// Error returned while parsing job functions from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown job function: {0}")]
pub struct ParseJobFunctionError(pub String);
