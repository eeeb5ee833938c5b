//! Build channel: released package feed or version-control source.

use super::TagError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source an extension is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Pre-built package from the PECL feed.
    Pecl,
    /// Build from the extension's source repository.
    Dev,
}

impl Channel {
    /// Every channel, in the order the matrix enumerates them.
    pub const ALL: [Self; 2] = [Self::Pecl, Self::Dev];

    /// Returns the canonical tag token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pecl => "pecl",
            Self::Dev => "dev",
        }
    }
}

impl TryFrom<&str> for Channel {
    type Error = TagError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pecl" => Ok(Self::Pecl),
            "dev" => Ok(Self::Dev),
            _ => Err(TagError::UnknownChannel(value.to_owned())),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
