use std::fmt;

use super::{shape::Scalar, CommandKind, DockerfileCommand};

macro_rules! scalar_command {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(Scalar);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(Scalar::new(value))
            }
        }

        shape_command!($name, Scalar, $kind);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", self.kind().keyword(), self.value())
            }
        }
    };
}

scalar_command!(
    /// `RUN command`: executed through the configured shell while building.
    ShellRun,
    CommandKind::ShellRun
);
scalar_command!(
    /// `CMD command`: default process, run through the configured shell.
    ShellCmd,
    CommandKind::ShellCmd
);
scalar_command!(
    /// `ENTRYPOINT command`
    ShellEntrypoint,
    CommandKind::ShellEntrypoint
);
scalar_command!(User, CommandKind::User);
scalar_command!(Workdir, CommandKind::Workdir);
scalar_command!(Maintainer, CommandKind::Maintainer);
scalar_command!(
    /// `STOPSIGNAL signal`, e.g. `SIGTERM` or `9`.
    StopSignal,
    CommandKind::StopSignal
);

/// `# escape=<char>` parser directive. Always rendered on the first line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escape(Scalar);

impl Escape {
    pub fn new(escape: char) -> Self {
        Self(Scalar::new(escape))
    }
}

shape_command!(Escape, Scalar, CommandKind::Escape);

impl fmt::Display for Escape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind().keyword(), self.value())
    }
}
