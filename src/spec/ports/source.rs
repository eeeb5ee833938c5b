//! Source port for the declarative spec documents.

use crate::spec::domain::{ExtensionDocument, OperatingSystemDocument};
use std::collections::BTreeMap;
use thiserror::Error;

/// Result type for spec operations.
pub type SpecResult<T> = Result<T, SpecError>;

/// Supplies the three spec documents.
///
/// Implementations are selected by construction (a JSON directory, an
/// in-memory fixture) and must return the same content for the lifetime of
/// the process.
pub trait SpecSource: Send + Sync {
    /// Returns every extension document keyed by extension name.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::ConfigLoad`] when the document cannot be read or
    /// decoded.
    fn extension_documents(&self) -> SpecResult<BTreeMap<String, ExtensionDocument>>;

    /// Returns every operating-system document keyed by system name.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::ConfigLoad`] when the document cannot be read or
    /// decoded.
    fn operating_system_documents(&self)
    -> SpecResult<BTreeMap<String, OperatingSystemDocument>>;

    /// Returns the base PHP release numbers.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::ConfigLoad`] when the document cannot be read or
    /// decoded.
    fn php_versions(&self) -> SpecResult<Vec<String>>;
}

/// Errors returned while loading or querying specs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpecError {
    /// A spec directory or document could not be loaded.
    #[error("failed to load configuration from {path}: {reason}")]
    ConfigLoad {
        /// Directory or file that failed.
        path: String,
        /// Underlying failure.
        reason: String,
    },

    /// No extension spec exists under the name.
    #[error("unknown extension: {0}")]
    UnknownExtension(String),

    /// No operating-system spec exists under the name.
    #[error("unknown operating system: {0}")]
    UnknownOperatingSystem(String),
}

impl SpecError {
    /// Builds a load failure for `path`.
    #[must_use]
    pub fn config_load(path: impl Into<String>, reason: &dyn std::fmt::Display) -> Self {
        Self::ConfigLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
