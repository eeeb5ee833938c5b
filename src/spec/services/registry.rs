//! Spec registry: typed lookups and the sorted matrix enumerations.

use crate::spec::{
    domain::{ExtensionSpec, OperatingSystemSpec},
    ports::{SpecError, SpecResult, SpecSource},
};
use crate::tag::Channel;
use std::collections::BTreeMap;
use std::sync::Arc;

const ZTS_VARIANTS: [&str; 2] = ["", "zts"];

/// Read-only view over a [`SpecSource`].
///
/// Every enumeration is sorted lexicographically, so repeated calls against
/// unchanged documents return identical sequences.
#[derive(Debug)]
pub struct SpecRegistry<S>
where
    S: SpecSource,
{
    source: Arc<S>,
}

impl<S> Clone for SpecRegistry<S>
where
    S: SpecSource,
{
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S> SpecRegistry<S>
where
    S: SpecSource,
{
    /// Creates a registry over `source`.
    #[must_use]
    pub const fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Returns every extension spec, disabled ones included, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::ConfigLoad`] when the document cannot be loaded.
    pub fn extensions(&self) -> SpecResult<Vec<ExtensionSpec>> {
        Ok(self
            .source
            .extension_documents()?
            .iter()
            .map(|(name, document)| ExtensionSpec::from_document(name, document))
            .collect())
    }

    /// Looks up one extension spec, whether or not it is disabled.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::UnknownExtension`] when no spec has that name.
    pub fn extension(&self, name: &str) -> SpecResult<ExtensionSpec> {
        self.source
            .extension_documents()?
            .get(name)
            .map(|document| ExtensionSpec::from_document(name, document))
            .ok_or_else(|| SpecError::UnknownExtension(name.to_owned()))
    }

    /// Returns the names of enabled extensions.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::ConfigLoad`] when the document cannot be loaded.
    pub fn extension_list(&self) -> SpecResult<Vec<String>> {
        Ok(self
            .source
            .extension_documents()?
            .into_iter()
            .filter(|(_, document)| !document.disabled)
            .map(|(name, _)| name)
            .collect())
    }

    /// Maps each enabled extension to its source repository location.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::ConfigLoad`] when the document cannot be loaded.
    pub fn extension_urls(&self) -> SpecResult<BTreeMap<String, String>> {
        Ok(self
            .source
            .extension_documents()?
            .into_iter()
            .filter(|(_, document)| !document.disabled)
            .map(|(name, document)| (name, document.build.url))
            .collect())
    }

    /// Returns the enabled operating-system specs, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::ConfigLoad`] when the document cannot be loaded.
    pub fn operating_systems(&self) -> SpecResult<Vec<OperatingSystemSpec>> {
        Ok(self
            .source
            .operating_system_documents()?
            .iter()
            .filter(|(_, document)| !document.disabled)
            .map(|(name, document)| OperatingSystemSpec::from_document(name, document))
            .collect())
    }

    /// Looks up one operating-system spec, whether or not it is disabled.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::UnknownOperatingSystem`] when no spec has that
    /// name.
    pub fn operating_system(&self, name: &str) -> SpecResult<OperatingSystemSpec> {
        self.source
            .operating_system_documents()?
            .get(name)
            .map(|document| OperatingSystemSpec::from_document(name, document))
            .ok_or_else(|| SpecError::UnknownOperatingSystem(name.to_owned()))
    }

    /// Returns the names of enabled operating systems.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::ConfigLoad`] when the document cannot be loaded.
    pub fn os_list(&self) -> SpecResult<Vec<String>> {
        Ok(self
            .source
            .operating_system_documents()?
            .into_iter()
            .filter(|(_, document)| !document.disabled)
            .map(|(name, _)| name)
            .collect())
    }

    /// Returns every PHP version token: each base release with and without
    /// the `-zts` marker.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::ConfigLoad`] when the document cannot be loaded.
    pub fn php_list(&self) -> SpecResult<Vec<String>> {
        let releases = self.source.php_versions()?;
        Ok(sorted_product(&releases, &ZTS_VARIANTS, "-"))
    }

    /// Returns the channels every extension is built from.
    #[must_use]
    pub const fn version_list() -> [Channel; 2] {
        Channel::ALL
    }

    /// Returns `ext:channel` for every enabled extension and channel.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::ConfigLoad`] when the document cannot be loaded.
    pub fn extension_matrix(&self) -> SpecResult<Vec<String>> {
        let channels = Self::version_list().map(Channel::as_str);
        Ok(sorted_product(&self.extension_list()?, &channels, ":"))
    }

    /// Returns `php-os` for every PHP version token and enabled system.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::ConfigLoad`] when a document cannot be loaded.
    pub fn php_matrix(&self) -> SpecResult<Vec<String>> {
        Ok(sorted_product(&self.php_list()?, &self.os_list()?, "-"))
    }

    /// Returns every canonical tag of the current spec set.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::ConfigLoad`] when a document cannot be loaded.
    pub fn build_matrix(&self) -> SpecResult<Vec<String>> {
        Ok(sorted_product(
            &self.extension_matrix()?,
            &self.php_matrix()?,
            "@",
        ))
    }
}

/// Joins every pair of `left × right` with `separator`, dropping empty
/// parts, and sorts the result.
fn sorted_product<L, R>(left: &[L], right: &[R], separator: &str) -> Vec<String>
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    let mut joined: Vec<String> = left
        .iter()
        .flat_map(|lhs| {
            right.iter().map(move |rhs| {
                [lhs.as_ref(), rhs.as_ref()]
                    .into_iter()
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join(separator)
            })
        })
        .collect();
    joined.sort();
    joined
}
