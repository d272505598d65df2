use std::{fmt, time::Duration};

use super::{CommandKind, DockerfileCommand, ExecCmd, Instruction, ShellCmd};
use crate::core::error::{DockerfileError, Result};

/// Interval between two checks when none is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);
/// Time a single check may take before it is considered failed.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Consecutive failures needed to mark the container unhealthy.
pub const DEFAULT_RETRIES: u32 = 3;
/// Instructions a `HEALTHCHECK` may run.
pub const HEALTHCHECK_TRIGGERS: &[CommandKind] = &[CommandKind::ExecCmd, CommandKind::ShellCmd];

/// Represents a `HEALTHCHECK` instruction.
///
/// The check runs either an exec-form or a shell-form `CMD`. Without a command it renders
/// `HEALTHCHECK NONE`, which disables any health check inherited from the base image.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use dockerfile_context::core::commands::Healthcheck;
///
/// let healthcheck = Healthcheck::cmd_shell("curl -f http://localhost/ || exit 1")
///     .with_interval(Duration::from_secs(5))
///     .with_retries(5);
///
/// assert_eq!(
///     healthcheck.to_string(),
///     "HEALTHCHECK --interval=5s --timeout=30s --retries=5 CMD curl -f http://localhost/ || exit 1"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Healthcheck {
    /// The command to run, `None` disables health checking.
    test: Option<Box<Instruction>>,
    /// The time to wait between health checks.
    interval: Duration,
    /// The time to wait before considering the health check failed.
    timeout: Duration,
    /// The number of consecutive failures needed to consider a container as unhealthy.
    retries: u32,
    /// Start period for the container to initialize before starting health-retries countdown.
    start_period: Option<Duration>,
}

impl Healthcheck {
    /// Creates a `Healthcheck` that disables the health check for the container.
    ///
    /// This is equivalent to `HEALTHCHECK NONE` in a Dockerfile.
    pub fn none() -> Self {
        Self::with_test(None)
    }

    /// Creates a `Healthcheck` running the given instruction.
    ///
    /// Fails with [`DockerfileError::InvalidCommand`] unless the instruction is one of
    /// [`HEALTHCHECK_TRIGGERS`].
    pub fn new(test: impl Into<Instruction>) -> Result<Self> {
        let test = test.into();
        if !HEALTHCHECK_TRIGGERS.contains(&test.kind()) {
            return Err(DockerfileError::invalid_command(
                CommandKind::Healthcheck,
                test.kind(),
            ));
        }
        Ok(Self::with_test(Some(test)))
    }

    /// Creates a `Healthcheck` running `CMD ["<command>", "<arg1>", ...]`.
    pub fn cmd<I, S>(command: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_test(Some(ExecCmd::new(command, arguments).into()))
    }

    /// Creates a `Healthcheck` running `CMD <command>` through the shell.
    pub fn cmd_shell(command: impl Into<String>) -> Self {
        Self::with_test(Some(ShellCmd::new(command).into()))
    }

    fn with_test(test: Option<Instruction>) -> Self {
        Self {
            test: test.map(Box::new),
            interval: DEFAULT_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            start_period: None,
        }
    }

    /// Sets the interval between health checks.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the timeout for each health check.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the number of consecutive failures needed to consider the container unhealthy.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Sets the start period for the container to initialize before starting health checks.
    pub fn with_start_period(mut self, start_period: Duration) -> Self {
        self.start_period = Some(start_period);
        self
    }

    /// Returns the command run by the check, `None` when health checking is disabled.
    pub fn test(&self) -> Option<&Instruction> {
        self.test.as_deref()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn start_period(&self) -> Option<Duration> {
        self.start_period
    }
}

impl DockerfileCommand for Healthcheck {
    fn kind(&self) -> CommandKind {
        CommandKind::Healthcheck
    }
}

impl fmt::Display for Healthcheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(test) = &self.test else {
            return f.write_str("HEALTHCHECK NONE");
        };

        write!(
            f,
            "HEALTHCHECK --interval={} --timeout={}",
            format_duration(self.interval),
            format_duration(self.timeout)
        )?;
        if let Some(start_period) = self.start_period {
            write!(f, " --start-period={}", format_duration(start_period))?;
        }
        write!(f, " --retries={} {test}", self.retries)
    }
}

/// Formats a duration the way the Docker engine parses it, e.g. `30s` or `1500ms`.
fn format_duration(duration: Duration) -> String {
    let nanos = duration.subsec_nanos();
    if nanos == 0 {
        format!("{}s", duration.as_secs())
    } else if nanos % 1_000_000 == 0 {
        format!("{}ms", duration.as_millis())
    } else if nanos % 1_000 == 0 {
        format!("{}us", duration.as_micros())
    } else {
        format!("{}ns", duration.as_nanos())
    }
}
