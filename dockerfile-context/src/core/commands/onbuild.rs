use std::fmt;

use super::{CommandKind, DockerfileCommand, Instruction};
use crate::core::error::{DockerfileError, Result};

/// Instructions an `ONBUILD` trigger must not carry.
///
/// The escape parser directive is not an instruction at all, so it is refused as well.
pub const ONBUILD_FORBIDDEN: &[CommandKind] = &[
    CommandKind::Onbuild,
    CommandKind::From,
    CommandKind::Maintainer,
    CommandKind::Escape,
];

/// `ONBUILD <instruction>`: a trigger executed when the image is used as a base for another build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Onbuild {
    trigger: Box<Instruction>,
}

impl Onbuild {
    /// Wraps `trigger`, failing with [`DockerfileError::InvalidCommand`] when it is one of
    /// [`ONBUILD_FORBIDDEN`].
    pub fn new(trigger: impl Into<Instruction>) -> Result<Self> {
        let trigger = trigger.into();
        if ONBUILD_FORBIDDEN.contains(&trigger.kind()) {
            return Err(DockerfileError::invalid_command(
                CommandKind::Onbuild,
                trigger.kind(),
            ));
        }
        Ok(Self {
            trigger: Box::new(trigger),
        })
    }

    pub fn trigger(&self) -> &Instruction {
        &self.trigger
    }
}

impl DockerfileCommand for Onbuild {
    fn kind(&self) -> CommandKind {
        CommandKind::Onbuild
    }
}

impl fmt::Display for Onbuild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ONBUILD {}", self.trigger)
    }
}
