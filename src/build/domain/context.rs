//! Dockerfile rendering.

use super::{AssemblerError, CommandBlock, DockerfileAssembler};
use crate::spec::domain::{ExtensionSpec, OperatingSystemSpec};
use crate::tag::Tag;
use minijinja::{Environment, context};

/// Working directory of every build.
pub const BASE_WORKDIR: &str = "/tmp";

const DOCKERFILE_TEMPLATE: &str = "FROM {{ base_image }}\n\
WORKDIR {{ workdir }}\n\
{% for block in blocks %}RUN {{ block | join(' && ') }}\n{% endfor %}";

/// Everything the container engine needs to build one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    image_tag: String,
    base_image: String,
    blocks: Vec<CommandBlock>,
}

impl BuildContext {
    /// Creates the context for `tag` with the assembled command blocks.
    ///
    /// The base image is `php:{php}-{os}` and the resulting image is tagged
    /// `{ext}:{channel}-{php}-{os}`.
    #[must_use]
    pub fn new(tag: &Tag, blocks: Vec<CommandBlock>) -> Self {
        let version_tag = format!("{}-{}", tag.php_version(), tag.os());
        Self {
            image_tag: format!("{}:{}-{version_tag}", tag.extension(), tag.channel()),
            base_image: format!("php:{version_tag}"),
            blocks,
        }
    }

    /// Assembles the command blocks for `tag` and wraps them in a context.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblerError::UnsupportedSourceType`] when a source build
    /// cannot check out the extension.
    pub fn assemble(
        tag: &Tag,
        extension: &ExtensionSpec,
        os: &OperatingSystemSpec,
    ) -> Result<Self, AssemblerError> {
        let blocks = DockerfileAssembler::new(extension, os).for_channel(tag.channel())?;
        Ok(Self::new(tag, blocks))
    }

    /// Returns the tag applied to the built image.
    #[must_use]
    pub fn image_tag(&self) -> &str {
        &self.image_tag
    }

    /// Returns the base image.
    #[must_use]
    pub fn base_image(&self) -> &str {
        &self.base_image
    }

    /// Returns the command blocks, one image layer each.
    #[must_use]
    pub fn blocks(&self) -> &[CommandBlock] {
        &self.blocks
    }

    /// Renders the Dockerfile text.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblerError::Render`] when template rendering fails.
    pub fn render(&self) -> Result<String, AssemblerError> {
        Environment::new()
            .render_str(
                DOCKERFILE_TEMPLATE,
                context! {
                    base_image => &self.base_image,
                    workdir => BASE_WORKDIR,
                    blocks => &self.blocks,
                },
            )
            .map_err(|error| AssemblerError::Render(error.to_string()))
    }
}
