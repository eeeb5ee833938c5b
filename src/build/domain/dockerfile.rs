//! Shell command blocks for the two build strategies.

use super::AssemblerError;
use crate::spec::domain::{ExtensionSpec, OperatingSystemSpec, SourceType};
use crate::tag::Channel;

/// Directory the extension source is checked out into.
pub const SOURCE_DIR: &str = "/tmp/ext-src";

/// Shell commands run together in one image layer.
pub type CommandBlock = Vec<String>;

/// Turns an extension and an operating system into build command blocks.
#[derive(Debug, Clone, Copy)]
pub struct DockerfileAssembler<'a> {
    extension: &'a ExtensionSpec,
    os: &'a OperatingSystemSpec,
}

impl<'a> DockerfileAssembler<'a> {
    /// Creates an assembler for `extension` on `os`.
    #[must_use]
    pub const fn new(extension: &'a ExtensionSpec, os: &'a OperatingSystemSpec) -> Self {
        Self { extension, os }
    }

    /// Returns the blocks for the strategy `channel` selects.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblerError::UnsupportedSourceType`] when a source build
    /// is requested for a source type other than git or svn.
    pub fn for_channel(&self, channel: Channel) -> Result<Vec<CommandBlock>, AssemblerError> {
        match channel {
            Channel::Pecl => Ok(self.build_from_pecl()),
            Channel::Dev => self.build_from_source(),
        }
    }

    /// Installs and tests the published PECL package.
    #[must_use]
    pub fn build_from_pecl(&self) -> Vec<CommandBlock> {
        let name = self.extension.name();
        vec![
            self.pre_build(),
            vec![
                format!("pecl install --force {name}"),
                format!("pecl run-tests {name}"),
            ],
        ]
    }

    /// Checks out the source, then configures, builds and tests it.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblerError::UnsupportedSourceType`] for source types
    /// other than git or svn.
    pub fn build_from_source(&self) -> Result<Vec<CommandBlock>, AssemblerError> {
        Ok(vec![
            self.pre_build(),
            vec![
                self.clone_command()?,
                format!("cd {}", self.source_path()),
                "phpize".to_owned(),
                format!("./configure {}", self.extension.build_flag()),
                "make".to_owned(),
                "make test".to_owned(),
            ],
        ])
    }

    /// Commands shared by both strategies: OS preparation, dependency
    /// installs and OS cleanup.
    #[must_use]
    pub fn pre_build(&self) -> CommandBlock {
        let install = self.os.dependency_install_command();
        let mut block: CommandBlock = self.os.pre_build().to_vec();

        let os_deps = self.os.dependencies();
        if !os_deps.is_empty() {
            block.push(format!("{install} {}", os_deps.join(" ")));
        }
        let ext_deps = self.extension.build_dependencies(self.os.name());
        if !ext_deps.is_empty() {
            block.push(format!("{install} {}", ext_deps.join(" ")));
        }

        block.extend_from_slice(self.os.post_dependency_install());
        block
    }

    fn clone_command(&self) -> Result<String, AssemblerError> {
        let url = self.extension.source_url();
        match self.extension.source_type() {
            SourceType::Git => Ok(format!("git clone --recursive --depth=1 {url} {SOURCE_DIR}")),
            SourceType::Svn => Ok(format!("svn checkout --revision HEAD {url} {SOURCE_DIR}")),
            SourceType::Other(other) => Err(AssemblerError::UnsupportedSourceType(other.clone())),
        }
    }

    fn source_path(&self) -> String {
        let relative = self.extension.build_path().trim_start_matches('/');
        format!("{SOURCE_DIR}/{relative}")
            .trim_end_matches('/')
            .to_owned()
    }
}
