//! Error types for tag and tag-pattern parsing.

use thiserror::Error;

/// Errors returned while parsing tags and tag patterns.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TagError {
    /// The value does not follow `ext:channel@php[-zts]-os`.
    #[error("tag '{0}' does not match required format")]
    InvalidTagFormat(String),

    /// The value is not a tag pattern, even after wildcard rewriting.
    #[error("tag pattern '{0}' does not match required format")]
    InvalidPatternFormat(String),

    /// The channel token is neither `pecl` nor `dev`.
    #[error("unknown channel: {0}")]
    UnknownChannel(String),
}
