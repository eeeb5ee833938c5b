//! Tag-pattern grammar and resolution against the spec registry.

use super::TagMatrix;
use crate::spec::{ports::SpecResult, ports::SpecSource, services::SpecRegistry};
use crate::tag::{Channel, TagError};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

const WILDCARD: &str = "*";

#[expect(clippy::expect_used, reason = "the pattern grammar is a literal")]
static PATTERN_GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<ext>[a-z0-9_-]+|\*):(?P<channel>pecl|dev|\*)@(?P<php>[0-9]+\.[0-9]+\.[0-9]+(?:-zts)?|\*)-(?P<os>[a-z]+|\*)$",
    )
    .expect("pattern grammar must compile")
});

/// One field of a tag pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternField<T> {
    /// Matches every candidate the registry knows.
    Any,
    /// Matches exactly this value.
    Exact(T),
}

impl<T: fmt::Display> fmt::Display for PatternField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str(WILDCARD),
            Self::Exact(value) => value.fmt(f),
        }
    }
}

/// A tag whose fields may be wildcards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagPattern {
    extension: PatternField<String>,
    channel: PatternField<Channel>,
    php_version: PatternField<String>,
    os: PatternField<String>,
}

impl TagPattern {
    /// Parses a pattern such as `amqp:*@*-buster`.
    ///
    /// The bare wildcard `*` matches everything. A leading `*@` is read as
    /// `*:*@` and a trailing `@*` as `@*-*`.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::InvalidPatternFormat`] when the normalised value
    /// does not match the pattern grammar.
    pub fn parse(value: &str) -> Result<Self, TagError> {
        let normalised = normalise(value);
        let invalid = || TagError::InvalidPatternFormat(value.to_owned());
        let captures = PATTERN_GRAMMAR.captures(&normalised).ok_or_else(invalid)?;
        let field = |name: &str| captures.name(name).map(|m| m.as_str()).ok_or_else(invalid);

        let channel = match field("channel")? {
            WILDCARD => PatternField::Any,
            token => PatternField::Exact(Channel::try_from(token)?),
        };

        Ok(Self {
            extension: text_field(field("ext")?),
            channel,
            php_version: text_field(field("php")?),
            os: text_field(field("os")?),
        })
    }

    /// Returns the extension field.
    #[must_use]
    pub const fn extension(&self) -> &PatternField<String> {
        &self.extension
    }

    /// Returns the channel field.
    #[must_use]
    pub const fn channel(&self) -> &PatternField<Channel> {
        &self.channel
    }

    /// Returns the PHP version field.
    #[must_use]
    pub const fn php_version(&self) -> &PatternField<String> {
        &self.php_version
    }

    /// Returns the operating system field.
    #[must_use]
    pub const fn os(&self) -> &PatternField<String> {
        &self.os
    }

    /// Expands the pattern against the registry's current enumerations.
    ///
    /// Only wildcard fields consult the registry; literal fields are taken
    /// as given.
    ///
    /// # Errors
    ///
    /// Returns a spec error when a document needed for a wildcard cannot be
    /// loaded.
    pub fn resolve<S>(&self, registry: &SpecRegistry<S>) -> SpecResult<TagMatrix>
    where
        S: SpecSource,
    {
        let extensions = match &self.extension {
            PatternField::Any => registry.extension_list()?,
            PatternField::Exact(name) => vec![name.clone()],
        };
        let channels = match self.channel {
            PatternField::Any => SpecRegistry::<S>::version_list().to_vec(),
            PatternField::Exact(channel) => vec![channel],
        };
        let php_versions = match &self.php_version {
            PatternField::Any => registry.php_list()?,
            PatternField::Exact(version) => vec![version.clone()],
        };
        let operating_systems = match &self.os {
            PatternField::Any => registry.os_list()?,
            PatternField::Exact(name) => vec![name.clone()],
        };
        Ok(TagMatrix::new(
            extensions,
            channels,
            php_versions,
            operating_systems,
        ))
    }
}

impl fmt::Display for TagPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}@{}-{}",
            self.extension, self.channel, self.php_version, self.os
        )
    }
}

impl FromStr for TagPattern {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn normalise(value: &str) -> String {
    if value == WILDCARD {
        return "*:*@*-*".to_owned();
    }
    let mut normalised = value.strip_prefix("*@").map_or_else(
        || value.to_owned(),
        |rest| format!("*:*@{rest}"),
    );
    if normalised.ends_with("@*") {
        normalised.push_str("-*");
    }
    normalised
}

fn text_field(token: &str) -> PatternField<String> {
    if token == WILDCARD {
        PatternField::Any
    } else {
        PatternField::Exact(token.to_owned())
    }
}
