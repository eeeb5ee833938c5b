//! Serde representations of the JSON spec documents.
//!
//! Every field is optional in the documents; absent values take the
//! defaults below.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const fn enabled() -> bool {
    true
}

/// One entry of `extensions.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionDocument {
    /// Excludes the extension from derived enumerations.
    #[serde(default)]
    pub disabled: bool,
    /// Whether a PECL package exists.
    #[serde(default = "enabled")]
    pub pecl: bool,
    /// Short human-readable description.
    #[serde(default)]
    pub summary: String,
    /// Runtime requirements.
    #[serde(default)]
    pub require: RequirementDocument,
    /// Source build settings.
    #[serde(default)]
    pub build: BuildDocument,
}

impl Default for ExtensionDocument {
    fn default() -> Self {
        Self {
            disabled: false,
            pecl: true,
            summary: String::new(),
            require: RequirementDocument::default(),
            build: BuildDocument::default(),
        }
    }
}

/// The `require` block of an extension document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementDocument {
    /// Requires a thread-safe runtime.
    pub zts: bool,
    /// Minimum supported PHP version.
    pub min: Option<String>,
    /// Maximum supported PHP version.
    pub max: Option<String>,
}

/// The `build` block of an extension document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildDocument {
    /// Extra packages per operating system.
    pub deps: BTreeMap<String, Vec<String>>,
    /// Argument passed to `./configure`.
    pub flag: String,
    /// Version-control system holding the source.
    #[serde(rename = "type")]
    pub source_type: String,
    /// Repository location.
    pub url: String,
    /// Directory of the extension inside the checkout.
    pub path: String,
}

/// One entry of `operating-systems.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingSystemDocument {
    /// Excludes the operating system from derived enumerations.
    pub disabled: bool,
    /// Commands run before dependencies are installed.
    pub pre: Vec<String>,
    /// Commands run after dependencies are installed.
    pub post: Vec<String>,
    /// Dependency installation settings.
    pub deps: DependencyDocument,
}

/// The `deps` block of an operating-system document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyDocument {
    /// Package installation command prefix.
    pub cmd: String,
    /// Packages every build needs on this system.
    pub list: Vec<String>,
}
