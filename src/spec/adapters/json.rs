//! Spec source reading JSON documents from a configuration directory.

use crate::spec::{
    domain::{ExtensionDocument, OperatingSystemDocument},
    ports::{SpecError, SpecResult, SpecSource},
};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// File holding the extension specs.
pub const EXTENSIONS_FILE: &str = "extensions.json";
/// File holding the operating-system specs.
pub const OPERATING_SYSTEMS_FILE: &str = "operating-systems.json";
/// File holding the base PHP versions.
pub const PHP_VERSIONS_FILE: &str = "php-versions.json";

/// Reads spec documents from one directory, caching each by file name.
#[derive(Debug)]
pub struct JsonSpecSource {
    root: Utf8PathBuf,
    dir: Dir,
    cache: RwLock<HashMap<String, Arc<Value>>>,
}

impl JsonSpecSource {
    /// Opens the configuration directory at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::ConfigLoad`] when `root` is missing or is not a
    /// directory.
    pub fn open(root: &Utf8Path) -> SpecResult<Self> {
        let dir = Dir::open_ambient_dir(root, ambient_authority())
            .map_err(|err| SpecError::config_load(root.as_str(), &err))?;
        Ok(Self {
            root: root.to_owned(),
            dir,
            cache: RwLock::new(HashMap::new()),
        })
    }

    /// Returns the configuration directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn document(&self, file: &str) -> SpecResult<Arc<Value>> {
        let path = self.root.join(file);
        let poisoned = |err: &dyn std::fmt::Display| SpecError::config_load(path.as_str(), err);

        if let Some(cached) = self
            .cache
            .read()
            .map_err(|err| poisoned(&err))?
            .get(file)
        {
            return Ok(Arc::clone(cached));
        }

        let contents = self
            .dir
            .read_to_string(file)
            .map_err(|err| SpecError::config_load(path.as_str(), &err))?;
        let value: Value = serde_json::from_str(&contents)
            .map_err(|err| SpecError::config_load(path.as_str(), &err))?;
        debug!(path = %path, "loaded spec document");

        let document = Arc::new(value);
        self.cache
            .write()
            .map_err(|err| poisoned(&err))?
            .insert(file.to_owned(), Arc::clone(&document));
        Ok(document)
    }

    fn decode<T: DeserializeOwned>(&self, file: &str) -> SpecResult<T> {
        let document = self.document(file)?;
        T::deserialize(document.as_ref())
            .map_err(|err| SpecError::config_load(self.root.join(file).as_str(), &err))
    }
}

impl SpecSource for JsonSpecSource {
    fn extension_documents(&self) -> SpecResult<BTreeMap<String, ExtensionDocument>> {
        self.decode(EXTENSIONS_FILE)
    }

    fn operating_system_documents(
        &self,
    ) -> SpecResult<BTreeMap<String, OperatingSystemDocument>> {
        self.decode(OPERATING_SYSTEMS_FILE)
    }

    fn php_versions(&self) -> SpecResult<Vec<String>> {
        self.decode(PHP_VERSIONS_FILE)
    }
}
