pub use self::{
    build::{
        ArchiveOptions, BuildContext, ContextArchiver, DEFAULT_ARCHIVE_PREFIX,
        DEFAULT_DOCKERFILE_PREFIX, DOCKERFILE_NAME,
    },
    builder::DockerfileBuilder,
    dockerfile::Dockerfile,
    error::{DockerfileError, Result},
};

pub mod commands;
pub mod env;

mod build;
mod builder;
mod dockerfile;
mod error;
