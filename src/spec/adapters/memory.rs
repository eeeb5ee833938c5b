//! In-memory spec source for tests and fixtures.

use crate::spec::{
    domain::{ExtensionDocument, OperatingSystemDocument},
    ports::{SpecResult, SpecSource},
};
use std::collections::BTreeMap;

/// Spec source holding its documents in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySpecSource {
    extensions: BTreeMap<String, ExtensionDocument>,
    operating_systems: BTreeMap<String, OperatingSystemDocument>,
    php_versions: Vec<String>,
}

impl InMemorySpecSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an extension document.
    #[must_use]
    pub fn with_extension(mut self, name: impl Into<String>, document: ExtensionDocument) -> Self {
        self.extensions.insert(name.into(), document);
        self
    }

    /// Adds an operating-system document.
    #[must_use]
    pub fn with_operating_system(
        mut self,
        name: impl Into<String>,
        document: OperatingSystemDocument,
    ) -> Self {
        self.operating_systems.insert(name.into(), document);
        self
    }

    /// Replaces the base PHP versions.
    #[must_use]
    pub fn with_php_versions<I, V>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.php_versions = versions.into_iter().map(Into::into).collect();
        self
    }
}

impl SpecSource for InMemorySpecSource {
    fn extension_documents(&self) -> SpecResult<BTreeMap<String, ExtensionDocument>> {
        Ok(self.extensions.clone())
    }

    fn operating_system_documents(
        &self,
    ) -> SpecResult<BTreeMap<String, OperatingSystemDocument>> {
        Ok(self.operating_systems.clone())
    }

    fn php_versions(&self) -> SpecResult<Vec<String>> {
        Ok(self.php_versions.clone())
    }
}
