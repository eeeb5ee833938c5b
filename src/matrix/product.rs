//! Lazy Cartesian product of candidate tag fields.

use crate::tag::{Channel, Tag, TagError};
use std::iter::FusedIterator;

/// Position of the next tag: extension, channel, PHP version, OS.
type Cursor = [usize; 4];

/// Lazily yields one tag per combination of the candidate lists.
///
/// The operating system varies fastest and the extension slowest. Cloning
/// the matrix restarts the sequence from the clone's current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatrix {
    extensions: Vec<String>,
    channels: Vec<Channel>,
    php_versions: Vec<String>,
    operating_systems: Vec<String>,
    cursor: Option<Cursor>,
    remaining: usize,
}

impl TagMatrix {
    /// Creates a matrix over the given candidate lists.
    #[must_use]
    pub fn new(
        extensions: Vec<String>,
        channels: Vec<Channel>,
        php_versions: Vec<String>,
        operating_systems: Vec<String>,
    ) -> Self {
        let remaining = [
            extensions.len(),
            channels.len(),
            php_versions.len(),
            operating_systems.len(),
        ]
        .into_iter()
        .fold(1_usize, usize::saturating_mul);
        Self {
            extensions,
            channels,
            php_versions,
            operating_systems,
            cursor: (remaining > 0).then_some([0; 4]),
            remaining,
        }
    }

    fn tag_at(&self, [ext, channel, php, os]: Cursor) -> Option<Result<Tag, TagError>> {
        let extension = self.extensions.get(ext)?;
        let channel_value = self.channels.get(channel)?;
        let php_version = self.php_versions.get(php)?;
        let os_name = self.operating_systems.get(os)?;
        Some(Tag::from_parts(
            extension,
            *channel_value,
            php_version,
            os_name,
        ))
    }

    fn advance(&self, [ext, channel, php, os]: Cursor) -> Option<Cursor> {
        if os + 1 < self.operating_systems.len() {
            Some([ext, channel, php, os + 1])
        } else if php + 1 < self.php_versions.len() {
            Some([ext, channel, php + 1, 0])
        } else if channel + 1 < self.channels.len() {
            Some([ext, channel + 1, 0, 0])
        } else if ext + 1 < self.extensions.len() {
            Some([ext + 1, 0, 0, 0])
        } else {
            None
        }
    }
}

impl Iterator for TagMatrix {
    type Item = Result<Tag, TagError>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor?;
        self.cursor = self.advance(cursor);
        self.remaining = self.remaining.saturating_sub(1);
        self.tag_at(cursor)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for TagMatrix {}

impl FusedIterator for TagMatrix {}
