//! PHP runtime versions as they appear in tags.

use std::cmp::Ordering;
use std::fmt;

const ZTS_SUFFIX: &str = "-zts";

/// A PHP runtime version: a dotted release plus the thread-safety marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhpVersion {
    release: String,
    zts: bool,
}

impl PhpVersion {
    /// Creates a version from an already validated release number.
    #[must_use]
    pub fn new(release: impl Into<String>, zts: bool) -> Self {
        Self {
            release: release.into(),
            zts,
        }
    }

    /// Splits a tag token such as `7.4.13-zts` into release and marker.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        token.strip_suffix(ZTS_SUFFIX).map_or_else(
            || Self::new(token, false),
            |release| Self::new(release, true),
        )
    }

    /// Returns the numeric release without the thread-safety marker.
    #[must_use]
    pub fn release(&self) -> &str {
        &self.release
    }

    /// Returns `true` for thread-safe runtime builds.
    #[must_use]
    pub const fn is_zts(&self) -> bool {
        self.zts
    }
}

impl fmt::Display for PhpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.zts {
            write!(f, "{}{ZTS_SUFFIX}", self.release)
        } else {
            f.write_str(&self.release)
        }
    }
}

/// Compares two dotted version strings numerically, segment by segment.
///
/// Missing trailing segments rank lower, so `5.6` sorts before `5.6.0`.
/// Non-numeric segments compare as zero.
#[must_use]
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let mut lhs = left.split('.').map(segment_value);
    let mut rhs = right.split('.').map(segment_value);
    loop {
        match (lhs.next(), rhs.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(a), Some(b)) => match a.cmp(&b) {
                Ordering::Equal => {}
                unequal => return unequal,
            },
        }
    }
}

fn segment_value(segment: &str) -> u64 {
    segment.trim().parse().unwrap_or(0)
}
