//! Operating system image specification.

use super::OperatingSystemDocument;

/// Immutable description of how to prepare one base image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatingSystemSpec {
    name: String,
    disabled: bool,
    pre_build: Vec<String>,
    post_dependency_install: Vec<String>,
    dependency_install_command: String,
    dependencies: Vec<String>,
}

impl OperatingSystemSpec {
    /// Creates an enabled operating system with no commands.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builds the spec for `name` from its JSON document.
    #[must_use]
    pub fn from_document(name: &str, document: &OperatingSystemDocument) -> Self {
        Self {
            name: name.to_owned(),
            disabled: document.disabled,
            pre_build: document.pre.clone(),
            post_dependency_install: document.post.clone(),
            dependency_install_command: document.deps.cmd.clone(),
            dependencies: document.deps.list.clone(),
        }
    }

    /// Appends a pre-build command.
    #[must_use]
    pub fn with_pre_build(mut self, command: impl Into<String>) -> Self {
        self.pre_build.push(command.into());
        self
    }

    /// Appends a post-dependency-install command.
    #[must_use]
    pub fn with_post_dependency_install(mut self, command: impl Into<String>) -> Self {
        self.post_dependency_install.push(command.into());
        self
    }

    /// Sets the package installation command.
    #[must_use]
    pub fn with_dependency_install_command(mut self, command: impl Into<String>) -> Self {
        self.dependency_install_command = command.into();
        self
    }

    /// Appends a dependency every build needs.
    #[must_use]
    pub fn with_dependency(mut self, dependency: impl Into<String>) -> Self {
        self.dependencies.push(dependency.into());
        self
    }

    /// Marks the operating system disabled.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Returns the operating system name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` when the system is excluded from the matrix.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns the pre-build commands.
    #[must_use]
    pub fn pre_build(&self) -> &[String] {
        &self.pre_build
    }

    /// Returns the post-dependency-install commands.
    #[must_use]
    pub fn post_dependency_install(&self) -> &[String] {
        &self.post_dependency_install
    }

    /// Returns the package installation command.
    #[must_use]
    pub fn dependency_install_command(&self) -> &str {
        &self.dependency_install_command
    }

    /// Returns the dependencies every build needs.
    #[must_use]
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }
}
