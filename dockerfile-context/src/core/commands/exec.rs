use std::fmt;

use super::{shape::ExecForm, CommandKind, DockerfileCommand};

macro_rules! exec_command {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(ExecForm);

        impl $name {
            pub fn new<I, S>(command: impl Into<String>, arguments: I) -> Self
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                Self(ExecForm::new(command, arguments))
            }
        }

        shape_command!($name, ExecForm, $kind);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.render(f, self.kind().keyword())
            }
        }
    };
}

exec_command!(
    /// `RUN ["command", "arg", ...]`: executes a process while building the image.
    ExecRun,
    CommandKind::ExecRun
);
exec_command!(
    /// `CMD ["command", "arg", ...]`: default process of the running container.
    ExecCmd,
    CommandKind::ExecCmd
);
exec_command!(
    /// `ENTRYPOINT ["command", "arg", ...]`
    ExecEntrypoint,
    CommandKind::ExecEntrypoint
);
exec_command!(
    /// `SHELL ["executable", "param", ...]`: shell used by the shell forms that follow.
    Shell,
    CommandKind::Shell
);
