use std::fmt;

use super::{
    AddFile, Arg, CommandKind, CopyFile, DockerfileCommand, Env, Escape, ExecCmd, ExecEntrypoint,
    ExecRun, Expose, FromImage, Healthcheck, KeyValue, Label, Maintainer, Onbuild, Shell,
    ShellCmd, ShellEntrypoint, ShellRun, StopSignal, User, Volume, Workdir,
};

macro_rules! instructions {
    ($($variant:ident($command:ty)),+ $(,)?) => {
        /// Any Dockerfile instruction, as stored by [`Dockerfile`](crate::core::Dockerfile).
        ///
        /// Cloning an instruction deep copies its payload, wrapped commands included.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Instruction {
            $($variant($command)),+
        }

        $(
            impl From<$command> for Instruction {
                fn from(command: $command) -> Self {
                    Self::$variant(command)
                }
            }
        )+

        impl fmt::Display for Instruction {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$variant(command) => fmt::Display::fmt(command, f)),+
                }
            }
        }

        impl DockerfileCommand for Instruction {
            fn kind(&self) -> CommandKind {
                match self {
                    $(Self::$variant(command) => command.kind()),+
                }
            }
        }
    };
}

instructions! {
    Escape(Escape),
    From(FromImage),
    Shell(Shell),
    Maintainer(Maintainer),
    Arg(Arg),
    Env(Env),
    Add(AddFile),
    Copy(CopyFile),
    ExecRun(ExecRun),
    ShellRun(ShellRun),
    ExecCmd(ExecCmd),
    ShellCmd(ShellCmd),
    User(User),
    Workdir(Workdir),
    Volume(Volume),
    Expose(Expose),
    ExecEntrypoint(ExecEntrypoint),
    ShellEntrypoint(ShellEntrypoint),
    Label(Label),
    StopSignal(StopSignal),
    Healthcheck(Healthcheck),
    Onbuild(Onbuild),
}

impl Instruction {
    /// Source/destination pair of an `ADD` or `COPY`, `None` for every other instruction.
    pub fn filesystem_copy(&self) -> Option<&KeyValue> {
        match self {
            Self::Add(add) => Some(&**add),
            Self::Copy(copy) => Some(&**copy),
            _ => None,
        }
    }

    pub(crate) fn filesystem_copy_mut(&mut self) -> Option<&mut KeyValue> {
        match self {
            Self::Add(add) => Some(&mut **add),
            Self::Copy(copy) => Some(&mut **copy),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delegates_rendering_and_priority() {
        let instruction = Instruction::from(ExecRun::new("make", ["all"]));

        assert_eq!(instruction.to_string(), r#"RUN ["make", "all"]"#);
        assert_eq!(instruction.kind(), CommandKind::ExecRun);
        assert_eq!(instruction.priority(), 10);
    }

    #[test]
    fn exposes_copy_payloads_only() {
        let copy = Instruction::from(CopyFile::new("a", "/b"));
        let env = Instruction::from(Env::new("A", "b"));

        assert_eq!(copy.filesystem_copy().map(|pair| pair.key()), Some("a"));
        assert!(env.filesystem_copy().is_none());
    }

    #[test]
    fn clone_is_independent() {
        let original = Instruction::from(AddFile::new("/src", "/dst"));
        let mut copy = original.clone();
        if let Some(pair) = copy.filesystem_copy_mut() {
            pair.set_key("src");
        }

        assert_eq!(original.to_string(), r#"ADD ["/src", "/dst"]"#);
        assert_eq!(copy.to_string(), r#"ADD ["src", "/dst"]"#);
    }
}
