use std::path::{Path, PathBuf};

use crate::core::env::GetEnvValue;

/// Overrides the directory the archive and the temporary Dockerfile are written to.
pub const BUILD_DIR_ENV: &str = "DOCKERFILE_CONTEXT_BUILD_DIR";

/// `1` or `true` keeps the temporary Dockerfile next to the archive after packaging.
pub const KEEP_DOCKERFILE_ENV: &str = "DOCKERFILE_CONTEXT_KEEP_DOCKERFILE";

#[derive(Debug, Default)]
pub(crate) struct Config {
    build_dir: Option<PathBuf>,
    keep_dockerfile: Option<bool>,
}

impl Config {
    pub(crate) fn load<E>() -> Self
    where
        E: GetEnvValue,
    {
        let build_dir = E::get_env_value(BUILD_DIR_ENV)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);
        let keep_dockerfile = E::get_env_value(KEEP_DOCKERFILE_ENV)
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true"));

        Config {
            build_dir,
            keep_dockerfile,
        }
    }

    /// The configured staging directory, if any.
    pub(crate) fn build_dir(&self) -> Option<&Path> {
        self.build_dir.as_deref()
    }

    pub(crate) fn remove_tmp_dockerfile(&self) -> Option<bool> {
        self.keep_dockerfile.map(|keep| !keep)
    }
}
