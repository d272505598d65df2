//! Typed Dockerfile instructions.
//!
//! Every instruction is a thin wrapper around one of the payload shapes in [`shape`]
//! and implements [`DockerfileCommand`]: its [`Display`](std::fmt::Display) impl is the
//! exact line it contributes to the Dockerfile, and its [`priority`](DockerfileCommand::priority)
//! decides where that line lands relative to the other instructions.

use std::fmt;

pub use self::{
    assoc::{AddFile, Arg, CopyFile, Env, Label},
    exec::{ExecCmd, ExecEntrypoint, ExecRun, Shell},
    from::FromImage,
    healthcheck::{
        Healthcheck, DEFAULT_INTERVAL, DEFAULT_RETRIES, DEFAULT_TIMEOUT, HEALTHCHECK_TRIGGERS,
    },
    instruction::Instruction,
    list::{Expose, Volume},
    onbuild::{Onbuild, ONBUILD_FORBIDDEN},
    scalar::{Escape, Maintainer, ShellCmd, ShellEntrypoint, ShellRun, StopSignal, User, Workdir},
    shape::{ExecForm, KeyValue, Scalar, ValueList},
};

/// Implements [`DockerfileCommand`] plus shape access for a wrapper around a payload shape.
macro_rules! shape_command {
    ($name:ident, $shape:ty, $kind:expr) => {
        impl $crate::core::commands::DockerfileCommand for $name {
            fn kind(&self) -> $crate::core::commands::CommandKind {
                $kind
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = $shape;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl ::std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl ::std::convert::From<$shape> for $name {
            fn from(shape: $shape) -> Self {
                Self(shape)
            }
        }
    };
}

mod assoc;
mod exec;
mod from;
mod healthcheck;
mod instruction;
mod list;
mod onbuild;
mod scalar;
pub mod shape;

/// Ordering key of an instruction. Lower values are rendered first.
pub type Priority = u8;

/// A single renderable Dockerfile instruction.
pub trait DockerfileCommand: fmt::Display {
    /// The kind of instruction, used for ordering and for validating wrapping commands.
    fn kind(&self) -> CommandKind;

    /// Position of the instruction in the rendered Dockerfile.
    fn priority(&self) -> Priority {
        self.kind().priority()
    }
}

/// Every instruction kind the command model knows how to render.
#[derive(parse_display::Display, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[display(style = "kebab-case")]
pub enum CommandKind {
    Escape,
    From,
    Shell,
    Maintainer,
    Arg,
    Env,
    Add,
    Copy,
    ExecRun,
    ShellRun,
    ExecCmd,
    ShellCmd,
    User,
    Workdir,
    Volume,
    Expose,
    ExecEntrypoint,
    ShellEntrypoint,
    Label,
    StopSignal,
    Healthcheck,
    Onbuild,
}

impl CommandKind {
    /// The fixed ordering priority of this kind of instruction.
    ///
    /// Instructions sharing a priority keep their insertion order.
    pub const fn priority(self) -> Priority {
        match self {
            Self::Escape => 1,
            Self::From => 2,
            Self::Shell => 3,
            Self::Maintainer => 4,
            Self::Arg => 5,
            Self::Env => 6,
            Self::Add
            | Self::Copy
            | Self::ExecRun
            | Self::ShellRun
            | Self::ExecCmd
            | Self::ShellCmd
            | Self::User
            | Self::Workdir => 10,
            Self::Volume => 18,
            Self::Expose => 19,
            Self::ExecEntrypoint | Self::ShellEntrypoint => 20,
            Self::Label => 21,
            Self::StopSignal | Self::Healthcheck => 22,
            Self::Onbuild => 23,
        }
    }

    /// The Dockerfile keyword this kind renders with.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Escape => "# escape=",
            Self::From => "FROM",
            Self::Shell => "SHELL",
            Self::Maintainer => "MAINTAINER",
            Self::Arg => "ARG",
            Self::Env => "ENV",
            Self::Add => "ADD",
            Self::Copy => "COPY",
            Self::ExecRun | Self::ShellRun => "RUN",
            Self::ExecCmd | Self::ShellCmd => "CMD",
            Self::User => "USER",
            Self::Workdir => "WORKDIR",
            Self::Volume => "VOLUME",
            Self::Expose => "EXPOSE",
            Self::ExecEntrypoint | Self::ShellEntrypoint => "ENTRYPOINT",
            Self::Label => "LABEL",
            Self::StopSignal => "STOPSIGNAL",
            Self::Healthcheck => "HEALTHCHECK",
            Self::Onbuild => "ONBUILD",
        }
    }

    /// Whether the instruction imports host content into the image (`ADD` / `COPY`).
    pub const fn is_filesystem_copy(self) -> bool {
        matches!(self, Self::Add | Self::Copy)
    }
}
