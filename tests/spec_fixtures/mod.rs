//! Spec documents and build output shared by the in-memory suites.

use camino::Utf8PathBuf;
use extmatrix::spec::{adapters::JsonSpecSource, ports::SpecResult, services::SpecRegistry};
use std::sync::Arc;

/// Returns the path of a directory under `tests/fixtures`.
#[must_use]
pub fn fixture_dir(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Opens the spec registry over the `config` fixture documents.
///
/// # Errors
///
/// Returns the spec error when the fixture directory cannot be opened.
pub fn fixture_registry() -> SpecResult<SpecRegistry<JsonSpecSource>> {
    let source = JsonSpecSource::open(&fixture_dir("config"))?;
    Ok(SpecRegistry::new(Arc::new(source)))
}

/// Frames of a build that ends with a built image.
pub const PASSING_BUILD: [&str; 4] = [
    "Step 1/5 : FROM php:7.4.13-buster",
    " ---> 0123456789ab",
    " ---> Running in abcdef012345",
    "Successfully built fedcba987654",
];

/// Frames of a build that stops on a compiler error.
pub const FAILING_BUILD: [&str; 2] = [
    " ---> Running in abcdef012345",
    "configure: error: librabbitmq not found",
];
