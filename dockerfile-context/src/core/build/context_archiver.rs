use std::{
    collections::HashMap,
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use bytes::Bytes;
use log::{debug, error, info, trace, warn};

use crate::core::{
    build::ArchiveOptions,
    commands::KeyValue,
    error::{DockerfileError, Result},
    Dockerfile,
};

/// Name of the Dockerfile entry inside the build context.
pub const DOCKERFILE_NAME: &str = "Dockerfile";

/// A build context written to disk by [`ContextArchiver::package`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    archive_path: PathBuf,
    dockerfile: String,
    dockerfile_path: Option<PathBuf>,
}

impl BuildContext {
    /// Location of the tar archive.
    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// The Dockerfile stored in the archive, with copy sources rewritten.
    pub fn dockerfile(&self) -> &str {
        &self.dockerfile
    }

    /// The temporary Dockerfile, present only when it was kept after packaging.
    pub fn dockerfile_path(&self) -> Option<&Path> {
        self.dockerfile_path.as_deref()
    }
}

/// Packages a [`Dockerfile`] and the host paths its `ADD`/`COPY` instructions reference into a
/// single tar build context.
///
/// The packaged Dockerfile is a snapshot of the one given: every imported source is rewritten
/// to its location inside the archive (its base name), while the caller's Dockerfile keeps the
/// host paths. Sources that are excluded through [`ArchiveOptions::with_no_import`], or that
/// exist neither as a file nor as a directory, are left untouched and nothing is imported for
/// them.
///
/// # Example
///
/// ```rust,no_run
/// use dockerfile_context::core::{ArchiveOptions, ContextArchiver, DockerfileBuilder};
///
/// # fn example() -> dockerfile_context::core::Result<()> {
/// let dockerfile = DockerfileBuilder::new()
///     .from_tag("eclipse-temurin", "21-jre")
///     .copy("/tmp/build/app.jar", "/opt/app.jar")
///     .exec_cmd("java", ["-jar", "/opt/app.jar"])
///     .build();
///
/// let context = ContextArchiver::new(ArchiveOptions::from_env()).package(&dockerfile)?;
/// println!("build context written to {}", context.archive_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone)]
pub struct ContextArchiver {
    options: ArchiveOptions,
}

impl ContextArchiver {
    pub fn new(options: ArchiveOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ArchiveOptions {
        &self.options
    }

    /// Writes the build context to a new archive in the build directory.
    ///
    /// The archive is named `<archive_prefix><random>.tar`, the random part being drawn again
    /// until the name is free. On failure the partially written archive is removed.
    pub fn package(&self, dockerfile: &Dockerfile) -> Result<BuildContext> {
        let mut context = dockerfile.snapshot();
        let build_dir = self.options.build_dir();
        let (archive_path, archive) = self.create_archive(&build_dir)?;

        match self.write_archive(archive, &mut context, &build_dir) {
            Ok((rendered, dockerfile_path)) => {
                info!("Build context written to {archive_path:?}");
                Ok(BuildContext {
                    archive_path,
                    dockerfile: rendered,
                    dockerfile_path,
                })
            }
            Err(err) => {
                error!("Failed to write build context {archive_path:?}: {err}");
                if let Err(remove_err) = fs::remove_file(&archive_path) {
                    warn!("Could not remove partial archive {archive_path:?}: {remove_err}");
                }
                Err(err)
            }
        }
    }

    /// Builds the same archive as [`package`](Self::package) in memory, without touching the
    /// build directory.
    pub fn package_to_bytes(&self, dockerfile: &Dockerfile) -> Result<Bytes> {
        let mut context = dockerfile.snapshot();
        let mut ar = tar::Builder::new(Vec::new());
        ar.mode(tar::HeaderMode::Deterministic);

        self.import_sources(&mut ar, &mut context)?;
        append_bytes(&mut ar, context.render().as_bytes(), DOCKERFILE_NAME)?;

        let bytes = ar.into_inner()?;
        Ok(Bytes::from(bytes))
    }

    fn create_archive(&self, build_dir: &Path) -> Result<(PathBuf, File)> {
        loop {
            let candidate = build_dir.join(format!(
                "{}{}.tar",
                self.options.archive_prefix(),
                rand::random::<u32>()
            ));
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
            {
                Ok(file) => return Ok((candidate, file)),
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                    trace!("Archive name {candidate:?} is taken, drawing another one");
                }
                Err(err) => return Err(DockerfileError::archive_io(candidate)(err)),
            }
        }
    }

    /// Fills the archive and returns the rendered Dockerfile plus the kept temporary file.
    fn write_archive(
        &self,
        archive: File,
        context: &mut Dockerfile,
        build_dir: &Path,
    ) -> Result<(String, Option<PathBuf>)> {
        let mut ar = tar::Builder::new(BufWriter::new(archive));
        ar.mode(tar::HeaderMode::Deterministic);

        self.import_sources(&mut ar, context)?;

        let rendered = context.render();
        let mut script = tempfile::Builder::new()
            .prefix(self.options.dockerfile_prefix())
            .tempfile_in(build_dir)
            .map_err(DockerfileError::archive_io(build_dir))?;
        script
            .write_all(rendered.as_bytes())
            .and_then(|()| script.flush())
            .map_err(DockerfileError::archive_io(script.path()))?;
        ar.append_path_with_name(script.path(), DOCKERFILE_NAME)
            .map_err(DockerfileError::archive_io(script.path()))?;

        let mut writer = ar.into_inner()?;
        writer.flush()?;

        let dockerfile_path = if self.options.remove_tmp_dockerfile() {
            let path = script.path().to_path_buf();
            script.close().map_err(DockerfileError::archive_io(path))?;
            None
        } else {
            let path = script
                .into_temp_path()
                .keep()
                .map_err(|err| DockerfileError::ArchiveIo {
                    path: err.path.to_path_buf(),
                    source: err.error,
                })?;
            debug!("Kept temporary Dockerfile {path:?}");
            Some(path)
        };

        Ok((rendered, dockerfile_path))
    }

    /// Imports every file, then every directory, referenced by an `ADD`/`COPY` of `context`,
    /// rewriting each imported source to its archive name.
    fn import_sources<W: Write>(
        &self,
        ar: &mut tar::Builder<W>,
        context: &mut Dockerfile,
    ) -> Result<()> {
        let mut files: Vec<(&mut KeyValue, PathBuf)> = Vec::new();
        let mut directories: Vec<(&mut KeyValue, PathBuf)> = Vec::new();

        for source in context.filesystem_copies_mut() {
            let path = PathBuf::from(source.key());
            if self.options.is_excluded(&path) {
                debug!("Not importing excluded source {path:?}");
            } else if path.is_file() {
                files.push((source, path));
            } else if path.is_dir() {
                directories.push((source, path));
            } else {
                debug!("Source {path:?} is neither a file nor a directory, leaving it as is");
            }
        }

        let mut imported = HashMap::new();
        for (source, path) in files {
            if let Some(name) = import(ar, &mut imported, &path, append_file)? {
                source.set_key(name);
            }
        }
        for (source, path) in directories {
            if let Some(name) = import(ar, &mut imported, &path, append_tree)? {
                source.set_key(name);
            }
        }

        Ok(())
    }
}

type Append<W> = fn(&mut tar::Builder<W>, &Path, &str) -> Result<()>;

/// Appends `path` under its base name unless it was already imported, returning that name.
fn import<W: Write>(
    ar: &mut tar::Builder<W>,
    imported: &mut HashMap<String, PathBuf>,
    path: &Path,
    append: Append<W>,
) -> Result<Option<String>> {
    let Some(name) = base_name(path)? else {
        debug!("Source {path:?} has no base name, leaving it as is");
        return Ok(None);
    };
    if name == DOCKERFILE_NAME {
        warn!("Source {path:?} is archived as '{name}' and is shadowed by the generated Dockerfile");
    }

    match imported.get(&name) {
        Some(previous) if previous == path => {}
        previous => {
            if let Some(previous) = previous {
                warn!("Sources {previous:?} and {path:?} are both archived as '{name}'");
            }
            append(ar, path, &name)?;
            imported.insert(name.clone(), path.to_path_buf());
        }
    }

    Ok(Some(name))
}

fn base_name(path: &Path) -> Result<Option<String>> {
    let name = match path.file_name() {
        Some(name) => Some(name.to_owned()),
        // `.` or `..` are named after the directory they resolve to
        None => fs::canonicalize(path)
            .map_err(DockerfileError::archive_io(path))?
            .file_name()
            .map(ToOwned::to_owned),
    };
    Ok(name.map(|name| name.to_string_lossy().into_owned()))
}

fn append_file<W: Write>(ar: &mut tar::Builder<W>, source: &Path, name: &str) -> Result<()> {
    debug!("Adding file {source:?} as '{name}'");
    ar.append_path_with_name(source, name).map_err(|err| {
        error!("Could not append file to tar: {source:?}:{name}");
        DockerfileError::archive_io(source)(err)
    })
}

/// Mirrors the directory `source` as `name`: the directory entry, its files, then each of
/// its subdirectories recursively. Entries are visited in name order.
///
/// Symlinks to files are archived with the content they point to. Symlinks to directories,
/// dangling symlinks and special files are skipped.
fn append_tree<W: Write>(ar: &mut tar::Builder<W>, source: &Path, name: &str) -> Result<()> {
    debug!("Adding directory {source:?} as '{name}'");
    ar.append_dir(name, source).map_err(|err| {
        error!("Could not append directory to tar: {source:?}:{name}");
        DockerfileError::archive_io(source)(err)
    })?;

    let mut entries = fs::read_dir(source)
        .and_then(|entries| entries.collect::<io::Result<Vec<_>>>())
        .map_err(DockerfileError::archive_io(source))?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut subdirectories = Vec::new();
    for entry in entries {
        let path = entry.path();
        let entry_name = format!("{name}/{}", entry.file_name().to_string_lossy());
        let mut file_type = entry
            .file_type()
            .map_err(DockerfileError::archive_io(&path))?;

        if file_type.is_symlink() {
            file_type = match fs::metadata(&path) {
                Ok(metadata) => metadata.file_type(),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    debug!("Skipping dangling symlink {path:?}");
                    continue;
                }
                Err(err) => return Err(DockerfileError::archive_io(&path)(err)),
            };
            if file_type.is_dir() {
                debug!("Skipping symlinked directory {path:?}");
                continue;
            }
        }

        if file_type.is_file() {
            append_file(ar, &path, &entry_name)?;
        } else if file_type.is_dir() {
            subdirectories.push((path, entry_name));
        } else {
            debug!("Skipping special file {path:?}");
        }
    }

    for (path, entry_name) in subdirectories {
        append_tree(ar, &path, &entry_name)?;
    }

    Ok(())
}

fn append_bytes<W: Write>(ar: &mut tar::Builder<W>, data: &[u8], name: &str) -> Result<()> {
    let mut header = tar::Header::new_gnu();
    header.set_size(data.len() as u64);
    header.set_mode(0o0644);
    header.set_cksum();

    ar.append_data(&mut header, name, data).map_err(|err| {
        error!("Could not append data to tar: {name}");
        DockerfileError::Io(err)
    })
}
