//! Domain model for build specifications.
//!
//! Raw documents mirror the JSON schema; [`ExtensionSpec`] and
//! [`OperatingSystemSpec`] are the immutable views built from them.

mod document;
mod extension;
mod operating_system;

pub use document::{
    BuildDocument, DependencyDocument, ExtensionDocument, OperatingSystemDocument,
    RequirementDocument,
};
pub use extension::{ExtensionSpec, SourceType, sanitize_build_path};
pub use operating_system::OperatingSystemSpec;
