//! Unit tests for the build context.


use crate::spec::domain::{ExtensionSpec, OperatingSystemSpec, SourceType};

pub(super) fn buster() -> OperatingSystemSpec {
    OperatingSystemSpec::new("buster")
        .with_pre_build("apt update")
        .with_pre_build("apt full-upgrade -y")
        .with_dependency_install_command("apt install -y --no-install-recommends")
        .with_dependency("git")
        .with_dependency("autoconf")
        .with_dependency("build-essential")
        .with_post_dependency_install("rm -rf /var/lib/apt/lists/*")
}

pub(super) fn amqp() -> ExtensionSpec {
    ExtensionSpec::new("amqp")
        .with_min_php("5.6.0")
        .with_build_dependency("buster", "librabbitmq-dev")
        .with_build_dependency("alpine", "rabbitmq-c-dev")
        .with_build_flag("--with-amqp")
        .with_source(SourceType::Git, "https://github.com/php-amqp/php-amqp")
}
