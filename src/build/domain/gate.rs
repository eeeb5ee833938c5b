//! Pre-build eligibility rules.

use crate::spec::domain::ExtensionSpec;
use crate::tag::{Channel, Tag, compare_versions};
use std::cmp::Ordering;
use std::fmt;

/// Why a job was skipped instead of built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The tag asks for the PECL package and none exists.
    PeclUnavailable,
    /// The extension needs a thread-safe runtime and the tag is not ZTS.
    ThreadSafetyRequired,
    /// The PHP release is older than the declared minimum.
    BelowMinimum(String),
    /// The PHP release failed the declared maximum check.
    AboveMaximum(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PeclUnavailable => f.write_str("This extension is not available via PECL."),
            Self::ThreadSafetyRequired => {
                f.write_str("This extension requires a thread-safe version of PHP.")
            }
            Self::BelowMinimum(version) => {
                write!(f, "This extension requires PHP {version} or later.")
            }
            Self::AboveMaximum(version) => write!(f, "This extension requires PHP {version} or older."),
        }
    }
}

/// Outcome of the gate for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Proceed to the image build.
    Build,
    /// Record a skip with the given reason.
    Skip(SkipReason),
}

/// Compatibility gate evaluated before every build.
///
/// Rules run in a fixed order and the first match wins:
///
/// 1. PECL channel without a PECL package
/// 2. ZTS required but the tag is not ZTS
/// 3. Minimum PHP version (unless disabled)
/// 4. Maximum PHP version (unless disabled)
///
/// Version rules compare the numeric release with any `-zts` marker removed.
/// The maximum rule skips when the release compares *lower* than the
/// declared maximum, matching the check it replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompatibilityGate {
    check_min: bool,
    check_max: bool,
}

impl Default for CompatibilityGate {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl CompatibilityGate {
    /// Creates a gate with the version checks toggled as given.
    #[must_use]
    pub const fn new(check_min: bool, check_max: bool) -> Self {
        Self {
            check_min,
            check_max,
        }
    }

    /// Returns `true` when the minimum version rule is active.
    #[must_use]
    pub const fn checks_min(&self) -> bool {
        self.check_min
    }

    /// Returns `true` when the maximum version rule is active.
    #[must_use]
    pub const fn checks_max(&self) -> bool {
        self.check_max
    }

    /// Evaluates the rules for `tag` against `extension`.
    #[must_use]
    pub fn evaluate(&self, tag: &Tag, extension: &ExtensionSpec) -> GateDecision {
        if tag.channel() == Channel::Pecl && !extension.is_pecl_available() {
            return GateDecision::Skip(SkipReason::PeclUnavailable);
        }
        if extension.requires_zts() && !tag.is_zts() {
            return GateDecision::Skip(SkipReason::ThreadSafetyRequired);
        }

        let release = tag.php_version().release();
        if self.check_min
            && let Some(min) = extension.min_php()
            && compare_versions(release, min) == Ordering::Less
        {
            return GateDecision::Skip(SkipReason::BelowMinimum(min.to_owned()));
        }
        if self.check_max
            && let Some(max) = extension.max_php()
            && compare_versions(release, max) == Ordering::Less
        {
            return GateDecision::Skip(SkipReason::AboveMaximum(max.to_owned()));
        }

        GateDecision::Build
    }
}
