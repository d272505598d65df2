use std::{collections::BTreeMap, fmt};

use crate::core::commands::{DockerfileCommand, Instruction, KeyValue, Priority};

/// An in-memory Dockerfile: instructions grouped by priority.
///
/// Instructions render in ascending priority; instructions sharing a priority keep the order
/// they were added in. The rendered text therefore doesn't depend on the order in which
/// `FROM`, `ENV`, `EXPOSE`... were registered, only on the relative order of the build steps.
///
/// # Example
///
/// ```rust
/// use dockerfile_context::core::{
///     commands::{Env, Expose, FromImage, ShellRun},
///     Dockerfile,
/// };
///
/// let mut dockerfile = Dockerfile::new();
/// dockerfile
///     .add_command(Expose::new(["8080"]))
///     .add_command(ShellRun::new("make"))
///     .add_command(FromImage::with_tag("alpine", "3.20"))
///     .add_command(Env::new("PROFILE", "release"));
///
/// assert_eq!(
///     dockerfile.render(),
///     "FROM alpine:3.20\nENV PROFILE=release\nRUN make\nEXPOSE 8080\n"
/// );
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Dockerfile {
    commands: BTreeMap<Priority, Vec<Instruction>>,
}

impl Dockerfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command at the end of its priority group.
    pub fn add_command(&mut self, command: impl Into<Instruction>) -> &mut Self {
        let command = command.into();
        self.commands
            .entry(command.priority())
            .or_default()
            .push(command);
        self
    }

    /// Iterates the commands in render order.
    pub fn commands(&self) -> impl Iterator<Item = &Instruction> {
        self.commands.values().flatten()
    }

    /// Source/destination pairs of every top level `ADD` and `COPY`, in render order.
    pub(crate) fn filesystem_copies_mut(&mut self) -> impl Iterator<Item = &mut KeyValue> {
        self.commands
            .values_mut()
            .flatten()
            .filter_map(Instruction::filesystem_copy_mut)
    }

    /// Returns the Dockerfile text, one instruction per line.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Returns an independent deep copy.
    ///
    /// Changes made to the snapshot, such as the source rewrites performed while archiving,
    /// never reach `self`, and the other way around.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    pub fn len(&self) -> usize {
        self.commands.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Display for Dockerfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in self.commands() {
            writeln!(f, "{command}")?;
        }
        Ok(())
    }
}

impl<C: Into<Instruction>> Extend<C> for Dockerfile {
    fn extend<T: IntoIterator<Item = C>>(&mut self, iter: T) {
        for command in iter {
            self.add_command(command);
        }
    }
}

impl<C: Into<Instruction>> FromIterator<C> for Dockerfile {
    fn from_iter<T: IntoIterator<Item = C>>(iter: T) -> Self {
        let mut dockerfile = Self::new();
        dockerfile.extend(iter);
        dockerfile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::{
        Arg, CopyFile, Env, ExecCmd, FromImage, Healthcheck, Label, ShellRun, User, Volume,
    };

    #[test]
    fn empty_dockerfile_renders_nothing() {
        let dockerfile = Dockerfile::new();

        assert!(dockerfile.is_empty());
        assert_eq!(dockerfile.render(), "");
    }

    #[test]
    fn groups_by_priority_and_keeps_insertion_order_within_a_group() {
        let mut dockerfile = Dockerfile::new();
        dockerfile
            .add_command(ShellRun::new("first"))
            .add_command(Label::new("k", "v"))
            .add_command(Env::new("A", "1"))
            .add_command(CopyFile::new("app", "/app"))
            .add_command(FromImage::new("alpine"))
            .add_command(User::new("app"))
            .add_command(Arg::new("VERSION"))
            .add_command(ShellRun::new("second"))
            .add_command(Env::new("B", "2"));

        let expected = [
            "FROM alpine",
            "ARG VERSION",
            "ENV A=1",
            "ENV B=2",
            "RUN first",
            r#"COPY ["app", "/app"]"#,
            "USER app",
            "RUN second",
            r#"LABEL "k"="v""#,
        ];

        assert_eq!(dockerfile.render(), format!("{}\n", expected.join("\n")));
        assert_eq!(dockerfile.len(), expected.len());
    }

    #[test]
    fn render_does_not_mutate() {
        let dockerfile: Dockerfile = [FromImage::new("alpine")].into_iter().collect();
        let before = dockerfile.clone();
        let _ = dockerfile.render();

        assert_eq!(dockerfile, before);
    }

    #[test]
    fn snapshot_is_structurally_independent() {
        let mut live = Dockerfile::new();
        live.add_command(FromImage::new("alpine"));
        let mut snapshot = live.snapshot();

        snapshot.add_command(ShellRun::new("only in snapshot"));
        live.add_command(Volume::new(["/only-live"]));

        assert_eq!(live.render(), "FROM alpine\nVOLUME [\"/only-live\"]\n");
        assert_eq!(snapshot.render(), "FROM alpine\nRUN only in snapshot\n");
    }

    #[test]
    fn snapshot_payloads_are_independent() {
        let mut live = Dockerfile::new();
        live.add_command(CopyFile::new("/tmp/build/app.jar", "/opt/app.jar"));
        let mut snapshot = live.snapshot();

        for pair in snapshot.filesystem_copies_mut() {
            pair.set_key("app.jar");
        }
        for pair in live.filesystem_copies_mut() {
            pair.set_value("/srv/app.jar");
        }

        assert_eq!(
            live.render(),
            "COPY [\"/tmp/build/app.jar\", \"/srv/app.jar\"]\n"
        );
        assert_eq!(snapshot.render(), "COPY [\"app.jar\", \"/opt/app.jar\"]\n");
    }

    #[test]
    fn wrapped_commands_are_deep_copied() {
        let mut live = Dockerfile::new();
        live.add_command(Healthcheck::cmd("curl", ["-f", "localhost"]));
        let snapshot = live.snapshot();

        assert_eq!(live, snapshot);
        assert_eq!(live.render(), snapshot.render());
    }

    #[test]
    fn copies_are_found_in_render_order() {
        let mut dockerfile = Dockerfile::new();
        dockerfile
            .add_command(CopyFile::new("b", "/b"))
            .add_command(ExecCmd::new("run", Vec::<String>::new()))
            .add_command(CopyFile::new("c", "/c"));

        let keys: Vec<String> = dockerfile
            .filesystem_copies_mut()
            .map(|pair| pair.key().to_owned())
            .collect();

        assert_eq!(keys, ["b", "c"]);
    }
}
