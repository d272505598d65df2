use std::{io, path::PathBuf};

use crate::core::commands::CommandKind;

pub type Result<T> = std::result::Result<T, DockerfileError>;

/// Enum to represent the errors that can occur while composing or packaging a Dockerfile.
#[derive(Debug, thiserror::Error)]
pub enum DockerfileError {
    /// A wrapping command (`HEALTHCHECK`, `ONBUILD`) was given a command it cannot carry.
    #[error("{command} command cannot wrap a {wrapped} command")]
    InvalidCommand {
        command: CommandKind,
        wrapped: CommandKind,
    },
    /// Reading a referenced source or writing the archive failed for the given path.
    #[error("failed to archive '{}': {source}", .path.display())]
    ArchiveIo { path: PathBuf, source: io::Error },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl DockerfileError {
    pub(crate) fn invalid_command(command: CommandKind, wrapped: CommandKind) -> Self {
        Self::InvalidCommand { command, wrapped }
    }

    /// Returns a closure tagging an [`io::Error`] with the path it happened on.
    pub(crate) fn archive_io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::ArchiveIo { path, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_command_names_both_commands() {
        let err = DockerfileError::invalid_command(CommandKind::Healthcheck, CommandKind::Env);

        assert_eq!(
            err.to_string(),
            "healthcheck command cannot wrap a env command"
        );
    }

    #[test]
    fn archive_io_reports_the_failing_path() {
        let err = DockerfileError::archive_io("/tmp/missing")(io::Error::new(
            io::ErrorKind::NotFound,
            "gone",
        ));

        assert_eq!(err.to_string(), "failed to archive '/tmp/missing': gone");
    }
}
