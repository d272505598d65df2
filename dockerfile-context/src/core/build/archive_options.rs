use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use crate::core::env::{Config, GetEnvValue, Os};

/// Default prefix of the generated archive file name.
pub const DEFAULT_ARCHIVE_PREFIX: &str = "docker_build_archive_";
/// Default prefix of the temporary Dockerfile written while packaging.
pub const DEFAULT_DOCKERFILE_PREFIX: &str = "dockerfile_";

/// Options for packaging a [`Dockerfile`](crate::core::Dockerfile) into a build context.
///
/// # Example
///
/// ```rust,no_run
/// use dockerfile_context::core::ArchiveOptions;
///
/// let options = ArchiveOptions::new()
///     .with_build_dir("/var/tmp/builds")
///     .with_no_import("./secrets.env")
///     .with_remove_tmp_dockerfile(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOptions {
    pub(crate) no_import: HashSet<PathBuf>,
    pub(crate) build_dir: Option<PathBuf>,
    pub(crate) archive_prefix: String,
    pub(crate) dockerfile_prefix: String,
    pub(crate) remove_tmp_dockerfile: bool,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            no_import: HashSet::new(),
            build_dir: None,
            archive_prefix: DEFAULT_ARCHIVE_PREFIX.to_owned(),
            dockerfile_prefix: DEFAULT_DOCKERFILE_PREFIX.to_owned(),
            remove_tmp_dockerfile: true,
        }
    }
}

impl ArchiveOptions {
    /// Creates a new `ArchiveOptions` with default values.
    ///
    /// Nothing is excluded, the staging directory is the system temp directory and the
    /// temporary Dockerfile is removed once the archive is written.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options seeded from the process environment.
    ///
    /// See [`BUILD_DIR_ENV`](crate::core::env::BUILD_DIR_ENV) and
    /// [`KEEP_DOCKERFILE_ENV`](crate::core::env::KEEP_DOCKERFILE_ENV).
    pub fn from_env() -> Self {
        Self::from_env_with::<Os>()
    }

    /// Creates options seeded from the given environment.
    pub fn from_env_with<E: GetEnvValue>() -> Self {
        let config = Config::load::<E>();
        let mut options = Self::default();
        if let Some(build_dir) = config.build_dir() {
            options.build_dir = Some(build_dir.to_path_buf());
        }
        if let Some(remove) = config.remove_tmp_dockerfile() {
            options.remove_tmp_dockerfile = remove;
        }
        options
    }

    /// Excludes a copy source from the archive.
    ///
    /// `ADD`/`COPY` instructions whose source equals this path are left as written and
    /// nothing is imported for them.
    pub fn with_no_import(mut self, path: impl Into<PathBuf>) -> Self {
        self.no_import.insert(path.into());
        self
    }

    /// Replaces the whole set of excluded copy sources.
    pub fn with_no_imports<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.no_import = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the directory where the archive and the temporary Dockerfile are written.
    ///
    /// Default: the system temp directory.
    pub fn with_build_dir(mut self, build_dir: impl Into<PathBuf>) -> Self {
        self.build_dir = Some(build_dir.into());
        self
    }

    /// Default: `docker_build_archive_`
    pub fn with_archive_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.archive_prefix = prefix.into();
        self
    }

    /// Default: `dockerfile_`
    pub fn with_dockerfile_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.dockerfile_prefix = prefix.into();
        self
    }

    /// Sets whether the temporary Dockerfile is deleted once added to the archive.
    ///
    /// Default: `true`
    pub fn with_remove_tmp_dockerfile(mut self, remove: bool) -> Self {
        self.remove_tmp_dockerfile = remove;
        self
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        self.no_import.contains(path)
    }

    /// The staging directory packaging writes to.
    pub fn build_dir(&self) -> PathBuf {
        self.build_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn archive_prefix(&self) -> &str {
        &self.archive_prefix
    }

    pub fn dockerfile_prefix(&self) -> &str {
        &self.dockerfile_prefix
    }

    pub fn remove_tmp_dockerfile(&self) -> bool {
        self.remove_tmp_dockerfile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::{BUILD_DIR_ENV, KEEP_DOCKERFILE_ENV};

    #[derive(Debug)]
    struct FakeEnvKeep;

    impl GetEnvValue for FakeEnvKeep {
        fn get_env_value(key: &str) -> Option<String> {
            match key {
                BUILD_DIR_ENV => Some("/srv/builds".to_owned()),
                KEEP_DOCKERFILE_ENV => Some("1".to_owned()),
                _ => None,
            }
        }
    }

    #[test]
    fn defaults() {
        let options = ArchiveOptions::new();

        assert!(options.no_import.is_empty());
        assert_eq!(options.build_dir(), std::env::temp_dir());
        assert_eq!(options.archive_prefix(), "docker_build_archive_");
        assert_eq!(options.dockerfile_prefix(), "dockerfile_");
        assert!(options.remove_tmp_dockerfile());
    }

    #[test]
    fn environment_seeds_defaults() {
        let options = ArchiveOptions::from_env_with::<FakeEnvKeep>();

        assert_eq!(options.build_dir(), PathBuf::from("/srv/builds"));
        assert!(!options.remove_tmp_dockerfile());
    }

    #[test]
    fn explicit_options_override_the_environment() {
        let options = ArchiveOptions::from_env_with::<FakeEnvKeep>()
            .with_build_dir("/elsewhere")
            .with_remove_tmp_dockerfile(true);

        assert_eq!(options.build_dir(), PathBuf::from("/elsewhere"));
        assert!(options.remove_tmp_dockerfile());
    }

    #[test]
    fn exclusions_match_by_path() {
        let options = ArchiveOptions::new()
            .with_no_import("/tmp/secret")
            .with_no_import("/tmp/secret");

        assert!(options.is_excluded(Path::new("/tmp/secret")));
        assert!(!options.is_excluded(Path::new("/tmp/public")));

        let replaced = options.with_no_imports(["/a", "/b"]);
        assert!(!replaced.is_excluded(Path::new("/tmp/secret")));
        assert!(replaced.is_excluded(Path::new("/b")));
    }
}
