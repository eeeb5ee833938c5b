//! Status labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Label reported for tags that have never been processed.
pub const PENDING_LABEL: &str = "PENDING";

/// Stored outcome of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusLabel {
    /// Claimed by a worker, outcome not yet known.
    Build,
    /// Not built because a compatibility rule excluded it.
    Skip,
    /// Built and tested successfully.
    Pass,
    /// Build, test or processing failed.
    Fail,
}

impl StatusLabel {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Build => "BUILD",
            Self::Skip => "SKIP",
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }
}

impl TryFrom<&str> for StatusLabel {
    type Error = ParseStatusLabelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "BUILD" => Ok(Self::Build),
            "SKIP" => Ok(Self::Skip),
            "PASS" => Ok(Self::Pass),
            "FAIL" => Ok(Self::Fail),
            _ => Err(ParseStatusLabelError(value.to_owned())),
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned while parsing status labels from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown status label: {0}")]
pub struct ParseStatusLabelError(pub String);
