//! Extension build specification.

use super::ExtensionDocument;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

#[expect(clippy::expect_used, reason = "the patterns are literals")]
static DISALLOWED_PATH_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_/. -]").expect("path filter must compile"));

#[expect(clippy::expect_used, reason = "the patterns are literals")]
static RELATIVE_SEGMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\.{1,2}/)+").expect("segment filter must compile"));

/// Strips a build path down to a safe location inside the checkout.
///
/// Characters outside `[a-z0-9_/. -]` are removed first, then every run of
/// `./` and `../` segments.
#[must_use]
pub fn sanitize_build_path(path: &str) -> String {
    let filtered = DISALLOWED_PATH_CHARS.replace_all(path, "");
    RELATIVE_SEGMENTS.replace_all(&filtered, "").into_owned()
}

/// Version-control system an extension's source lives in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceType {
    /// Git repository.
    Git,
    /// Subversion repository.
    Svn,
    /// Any other declared value, rejected when a build is assembled.
    Other(String),
}

impl SourceType {
    /// Returns the document representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Git => "git",
            Self::Svn => "svn",
            Self::Other(value) => value,
        }
    }
}

impl From<&str> for SourceType {
    fn from(value: &str) -> Self {
        match value {
            "git" => Self::Git,
            "svn" => Self::Svn,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable description of how to build and gate one extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSpec {
    name: String,
    summary: String,
    disabled: bool,
    pecl_available: bool,
    min_php: Option<String>,
    max_php: Option<String>,
    requires_zts: bool,
    build_deps: BTreeMap<String, Vec<String>>,
    build_flag: String,
    source_type: SourceType,
    source_url: String,
    build_path: String,
}

impl ExtensionSpec {
    /// Creates an enabled, PECL-available extension with no requirements.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: String::new(),
            disabled: false,
            pecl_available: true,
            min_php: None,
            max_php: None,
            requires_zts: false,
            build_deps: BTreeMap::new(),
            build_flag: String::new(),
            source_type: SourceType::Other(String::new()),
            source_url: String::new(),
            build_path: String::new(),
        }
    }

    /// Builds the spec for `name` from its JSON document.
    #[must_use]
    pub fn from_document(name: &str, document: &ExtensionDocument) -> Self {
        let build = &document.build;
        Self {
            name: name.to_owned(),
            summary: document.summary.clone(),
            disabled: document.disabled,
            pecl_available: document.pecl,
            min_php: non_empty(document.require.min.as_deref()),
            max_php: non_empty(document.require.max.as_deref()),
            requires_zts: document.require.zts,
            build_deps: build.deps.clone(),
            build_flag: build.flag.clone(),
            source_type: SourceType::from(build.source_type.as_str()),
            source_url: build.url.clone(),
            build_path: sanitize_build_path(&build.path),
        }
    }

    /// Sets the summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Marks the extension disabled.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Marks the extension as absent from PECL.
    #[must_use]
    pub const fn without_pecl(mut self) -> Self {
        self.pecl_available = false;
        self
    }

    /// Requires a thread-safe runtime.
    #[must_use]
    pub const fn requiring_zts(mut self) -> Self {
        self.requires_zts = true;
        self
    }

    /// Sets the minimum supported PHP version.
    #[must_use]
    pub fn with_min_php(mut self, version: impl Into<String>) -> Self {
        self.min_php = Some(version.into());
        self
    }

    /// Sets the maximum supported PHP version.
    #[must_use]
    pub fn with_max_php(mut self, version: impl Into<String>) -> Self {
        self.max_php = Some(version.into());
        self
    }

    /// Adds a build dependency for one operating system.
    #[must_use]
    pub fn with_build_dependency(
        mut self,
        os: impl Into<String>,
        dependency: impl Into<String>,
    ) -> Self {
        self.build_deps
            .entry(os.into())
            .or_default()
            .push(dependency.into());
        self
    }

    /// Sets the `./configure` flag.
    #[must_use]
    pub fn with_build_flag(mut self, flag: impl Into<String>) -> Self {
        self.build_flag = flag.into();
        self
    }

    /// Sets the source repository.
    #[must_use]
    pub fn with_source(mut self, source_type: SourceType, url: impl Into<String>) -> Self {
        self.source_type = source_type;
        self.source_url = url.into();
        self
    }

    /// Sets the build path, sanitising it.
    #[must_use]
    pub fn with_build_path(mut self, path: &str) -> Self {
        self.build_path = sanitize_build_path(path);
        self
    }

    /// Returns the extension name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the summary.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns `true` when the extension is excluded from the matrix.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns `true` when a PECL package exists.
    #[must_use]
    pub const fn is_pecl_available(&self) -> bool {
        self.pecl_available
    }

    /// Returns the minimum supported PHP version.
    #[must_use]
    pub fn min_php(&self) -> Option<&str> {
        self.min_php.as_deref()
    }

    /// Returns the maximum supported PHP version.
    #[must_use]
    pub fn max_php(&self) -> Option<&str> {
        self.max_php.as_deref()
    }

    /// Returns `true` when only thread-safe runtimes are supported.
    #[must_use]
    pub const fn requires_zts(&self) -> bool {
        self.requires_zts
    }

    /// Returns the extra packages needed on `os`.
    #[must_use]
    pub fn build_dependencies(&self, os: &str) -> &[String] {
        self.build_deps
            .get(os)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the `./configure` flag.
    #[must_use]
    pub fn build_flag(&self) -> &str {
        &self.build_flag
    }

    /// Returns the source repository type.
    #[must_use]
    pub const fn source_type(&self) -> &SourceType {
        &self.source_type
    }

    /// Returns the source repository location.
    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Returns the sanitised build path.
    #[must_use]
    pub fn build_path(&self) -> &str {
        &self.build_path
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|version| !version.is_empty())
        .map(str::to_owned)
}
