//! Build status aggregate.

use super::StatusLabel;
use crate::tag::Tag;
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Result of one completed image build, as recorded on a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRecord {
    /// Rendered Dockerfile.
    pub dockerfile: String,
    /// Build output, one line per log entry.
    pub log: String,
    /// Wall-clock build time rounded up to whole seconds.
    pub build_time_secs: u32,
    /// Whether the build passed.
    pub passed: bool,
}

/// Last known outcome of one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStatus {
    tag: Tag,
    label: StatusLabel,
    file: Option<String>,
    log: Option<String>,
    build_time_secs: u32,
    changed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedStatusData {
    /// Tag the status belongs to.
    pub tag: Tag,
    /// Persisted label.
    pub label: StatusLabel,
    /// Rendered Dockerfile, if a build ran.
    pub file: Option<String>,
    /// Build output or failure message.
    pub log: Option<String>,
    /// Persisted build time in seconds.
    pub build_time_secs: u32,
    /// Whether the latest label assignment changed the label.
    pub changed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl BuildStatus {
    /// Creates the first status of `tag`, labelled [`StatusLabel::Build`].
    ///
    /// A new status always counts as changed.
    #[must_use]
    pub fn new(tag: Tag, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            tag,
            label: StatusLabel::Build,
            file: None,
            log: None,
            build_time_secs: 0,
            changed: true,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a status from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedStatusData) -> Self {
        Self {
            tag: data.tag,
            label: data.label,
            file: data.file,
            log: data.log,
            build_time_secs: data.build_time_secs,
            changed: data.changed,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the tag.
    #[must_use]
    pub const fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Returns the label.
    #[must_use]
    pub const fn label(&self) -> StatusLabel {
        self.label
    }

    /// Returns the rendered Dockerfile.
    #[must_use]
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Returns the build output or failure message.
    #[must_use]
    pub fn log(&self) -> Option<&str> {
        self.log.as_deref()
    }

    /// Returns the build time in seconds.
    #[must_use]
    pub const fn build_time_secs(&self) -> u32 {
        self.build_time_secs
    }

    /// Returns `true` when the latest label assignment changed the label.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        self.changed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Assigns a label, flagging whether it differs from the previous one.
    pub fn set_label(&mut self, label: StatusLabel, clock: &impl Clock) {
        self.changed = self.label != label;
        self.label = label;
        self.touch(clock);
    }

    /// Records a compatibility skip with its reason.
    pub fn record_skip(&mut self, reason: impl Into<String>, clock: &impl Clock) {
        self.log = Some(reason.into());
        self.set_label(StatusLabel::Skip, clock);
    }

    /// Records a failure that happened outside the image build.
    pub fn record_failure(&mut self, message: impl Into<String>, clock: &impl Clock) {
        self.log = Some(message.into());
        self.set_label(StatusLabel::Fail, clock);
    }

    /// Records a completed image build.
    pub fn record_build(&mut self, record: BuildRecord, clock: &impl Clock) {
        let label = if record.passed {
            StatusLabel::Pass
        } else {
            StatusLabel::Fail
        };
        self.file = Some(record.dockerfile);
        self.log = Some(record.log);
        self.build_time_secs = record.build_time_secs;
        self.set_label(label, clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
