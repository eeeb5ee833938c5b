//! The `Tag` value type and its wire grammar.

use super::{Channel, PhpVersion, TagError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

#[expect(clippy::expect_used, reason = "the tag grammar is a literal")]
static TAG_GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<ext>[a-z0-9_-]+):(?P<channel>pecl|dev)@(?P<php>[0-9]+\.[0-9]+\.[0-9]+(?:-zts)?)-(?P<os>[a-z]+)$",
    )
    .expect("tag grammar must compile")
});

/// Canonical identifier of one build task.
///
/// Serialises as `ext:channel@php[-zts]-os`; [`Tag::parse`] is its exact
/// inverse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag {
    extension: String,
    channel: Channel,
    php_version: PhpVersion,
    os: String,
}

impl Tag {
    /// Parses a canonical tag string.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::InvalidTagFormat`] when the value does not match
    /// the tag grammar.
    pub fn parse(value: &str) -> Result<Self, TagError> {
        let invalid = || TagError::InvalidTagFormat(value.to_owned());
        let captures = TAG_GRAMMAR.captures(value).ok_or_else(invalid)?;
        let field = |name: &str| captures.name(name).map(|m| m.as_str());

        let extension = field("ext").ok_or_else(invalid)?;
        let channel = Channel::try_from(field("channel").ok_or_else(invalid)?)?;
        let php = field("php").ok_or_else(invalid)?;
        let os = field("os").ok_or_else(invalid)?;

        Ok(Self {
            extension: extension.to_owned(),
            channel,
            php_version: PhpVersion::from_token(php),
            os: os.to_owned(),
        })
    }

    /// Builds a tag from its parts, validating the result against the
    /// grammar.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::InvalidTagFormat`] when any part falls outside
    /// its allowed alphabet.
    pub fn from_parts(
        extension: &str,
        channel: Channel,
        php_version: &str,
        os: &str,
    ) -> Result<Self, TagError> {
        Self::parse(&format!("{extension}:{channel}@{php_version}-{os}"))
    }

    /// Returns the extension name.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Returns the build channel.
    #[must_use]
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// Returns the PHP runtime version.
    #[must_use]
    pub const fn php_version(&self) -> &PhpVersion {
        &self.php_version
    }

    /// Returns `true` when the tag targets a thread-safe runtime.
    #[must_use]
    pub const fn is_zts(&self) -> bool {
        self.php_version.is_zts()
    }

    /// Returns the operating system name.
    #[must_use]
    pub fn os(&self) -> &str {
        &self.os
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}@{}-{}",
            self.extension, self.channel, self.php_version, self.os
        )
    }
}

impl FromStr for Tag {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Tag {
    type Error = TagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Tag> for String {
    fn from(value: Tag) -> Self {
        value.to_string()
    }
}
