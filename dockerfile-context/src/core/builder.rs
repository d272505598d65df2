use crate::core::{
    commands::{
        AddFile, Arg, CopyFile, Env, Escape, ExecCmd, ExecEntrypoint, ExecRun, Expose, FromImage,
        Healthcheck, Instruction, Label, Maintainer, Onbuild, Shell, ShellCmd, ShellEntrypoint,
        ShellRun, StopSignal, User, Volume, Workdir,
    },
    error::Result,
    Dockerfile,
};

/// Fluent API registering one instruction per call.
///
/// # Example
///
/// ```rust
/// use dockerfile_context::core::DockerfileBuilder;
///
/// let dockerfile = DockerfileBuilder::new()
///     .exec_cmd("/app/server", ["--port", "8080"])
///     .copy("./target/release/server", "/app/server")
///     .from_tag("debian", "bookworm-slim")
///     .expose(["8080"])
///     .build();
///
/// assert_eq!(
///     dockerfile.render(),
///     "FROM debian:bookworm-slim\n\
///      CMD [\"/app/server\", \"--port\", \"8080\"]\n\
///      COPY [\"./target/release/server\", \"/app/server\"]\n\
///      EXPOSE 8080\n"
/// );
/// ```
#[derive(Debug, Default, Clone)]
pub struct DockerfileBuilder {
    dockerfile: Dockerfile,
}

impl DockerfileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers any instruction.
    pub fn command(mut self, command: impl Into<Instruction>) -> Self {
        self.dockerfile.add_command(command);
        self
    }

    /// `FROM image`
    pub fn from(self, image: impl Into<String>) -> Self {
        self.command(FromImage::new(image))
    }

    /// `FROM image:tag`
    pub fn from_tag(self, image: impl Into<String>, tag: impl Into<String>) -> Self {
        self.command(FromImage::with_tag(image, tag))
    }

    /// `# escape=<char>`
    pub fn escape(self, escape: char) -> Self {
        self.command(Escape::new(escape))
    }

    /// `ARG name`
    pub fn arg(self, name: impl Into<String>) -> Self {
        self.command(Arg::new(name))
    }

    /// `ARG name=default`
    pub fn arg_with_default(self, name: impl Into<String>, default: impl Into<String>) -> Self {
        self.command(Arg::with_default(name, default))
    }

    /// `ENV key=value`
    pub fn env(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.command(Env::new(key, value))
    }

    /// `ADD ["source", "destination"]`, the host source is imported when packaging.
    pub fn add(self, source: impl Into<String>, destination: impl Into<String>) -> Self {
        self.command(AddFile::new(source, destination))
    }

    /// `COPY ["source", "destination"]`, the host source is imported when packaging.
    pub fn copy(self, source: impl Into<String>, destination: impl Into<String>) -> Self {
        self.command(CopyFile::new(source, destination))
    }

    /// `RUN ["command", "arg", ...]`
    pub fn exec_run<I, S>(self, command: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command(ExecRun::new(command, arguments))
    }

    /// `RUN command`
    pub fn shell_run(self, command: impl Into<String>) -> Self {
        self.command(ShellRun::new(command))
    }

    /// `CMD ["command", "arg", ...]`
    pub fn exec_cmd<I, S>(self, command: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command(ExecCmd::new(command, arguments))
    }

    /// `CMD command`
    pub fn shell_cmd(self, command: impl Into<String>) -> Self {
        self.command(ShellCmd::new(command))
    }

    /// `ENTRYPOINT ["command", "arg", ...]`
    pub fn exec_entrypoint<I, S>(self, command: impl Into<String>, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command(ExecEntrypoint::new(command, arguments))
    }

    /// `ENTRYPOINT command`
    pub fn shell_entrypoint(self, command: impl Into<String>) -> Self {
        self.command(ShellEntrypoint::new(command))
    }

    /// `SHELL ["executable", "param", ...]`
    pub fn shell<I, S>(self, executable: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command(Shell::new(executable, parameters))
    }

    /// `USER user`
    pub fn user(self, user: impl Into<String>) -> Self {
        self.command(User::new(user))
    }

    /// `WORKDIR path`
    pub fn workdir(self, path: impl Into<String>) -> Self {
        self.command(Workdir::new(path))
    }

    /// `EXPOSE port ...`. Ports may be numbers or `port/protocol` strings.
    pub fn expose<I>(self, ports: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.command(Expose::new(ports.into_iter().map(|port| port.to_string())))
    }

    /// `VOLUME ["path", ...]`
    pub fn volume<I, S>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command(Volume::new(paths))
    }

    /// `LABEL "key"="value"`
    pub fn label(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.command(Label::new(key, value))
    }

    /// `MAINTAINER name`
    pub fn maintainer(self, maintainer: impl Into<String>) -> Self {
        self.command(Maintainer::new(maintainer))
    }

    /// `STOPSIGNAL signal`
    pub fn stop_signal(self, signal: impl Into<String>) -> Self {
        self.command(StopSignal::new(signal))
    }

    /// `HEALTHCHECK ...`, see [`Healthcheck`] for the constructors.
    pub fn healthcheck(self, healthcheck: Healthcheck) -> Self {
        self.command(healthcheck)
    }

    /// `ONBUILD <trigger>`
    ///
    /// Fails with [`DockerfileError::InvalidCommand`](crate::core::DockerfileError::InvalidCommand)
    /// when the trigger is one of [`ONBUILD_FORBIDDEN`](crate::core::commands::ONBUILD_FORBIDDEN).
    pub fn onbuild(self, trigger: impl Into<Instruction>) -> Result<Self> {
        Ok(self.command(Onbuild::new(trigger)?))
    }

    /// Borrows the Dockerfile built so far.
    pub fn dockerfile(&self) -> &Dockerfile {
        &self.dockerfile
    }

    pub fn build(self) -> Dockerfile {
        self.dockerfile
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::{commands::CommandKind, DockerfileError};

    #[test]
    fn every_call_registers_one_command() {
        let builder = DockerfileBuilder::new()
            .escape('`')
            .from("alpine")
            .arg("A")
            .arg_with_default("B", "b")
            .env("C", "c")
            .add("x", "/x")
            .copy("y", "/y")
            .exec_run("make", ["all"])
            .shell_run("make install")
            .exec_cmd("app", Vec::<String>::new())
            .shell_cmd("app")
            .exec_entrypoint("tini", ["--"])
            .shell_entrypoint("tini")
            .shell("/bin/sh", ["-c"])
            .user("app")
            .workdir("/app")
            .expose([80, 443])
            .volume(["/data"])
            .label("k", "v")
            .maintainer("me")
            .stop_signal("SIGTERM")
            .healthcheck(Healthcheck::none());

        assert_eq!(builder.dockerfile().len(), 22);
    }

    #[test]
    fn renders_a_full_dockerfile() {
        let dockerfile = DockerfileBuilder::new()
            .label("maintainer.team", "platform")
            .healthcheck(
                Healthcheck::cmd("curl", ["-f", "http://localhost/"])
                    .with_interval(Duration::from_secs(10)),
            )
            .expose(["80"])
            .volume(["/var/cache/nginx"])
            .copy("/tmp/site", "/usr/share/nginx/html")
            .env("NGINX_PORT", "80")
            .from_tag("nginx", "1.27")
            .stop_signal("SIGQUIT")
            .shell_run("rm /etc/nginx/conf.d/default.conf")
            .exec_cmd("nginx", ["-g", "daemon off;"])
            .onbuild(CopyFile::new(".", "/usr/share/nginx/html"))
            .unwrap()
            .build();

        let expected = "\
FROM nginx:1.27
ENV NGINX_PORT=80
COPY [\"/tmp/site\", \"/usr/share/nginx/html\"]
RUN rm /etc/nginx/conf.d/default.conf
CMD [\"nginx\", \"-g\", \"daemon off;\"]
VOLUME [\"/var/cache/nginx\"]
EXPOSE 80
LABEL \"maintainer.team\"=\"platform\"
HEALTHCHECK --interval=10s --timeout=30s --retries=3 CMD [\"curl\", \"-f\", \"http://localhost/\"]
STOPSIGNAL SIGQUIT
ONBUILD COPY [\".\", \"/usr/share/nginx/html\"]
";

        assert_eq!(dockerfile.render(), expected);
    }

    #[test]
    fn onbuild_rejects_from() {
        let err = DockerfileBuilder::new()
            .onbuild(FromImage::new("alpine"))
            .unwrap_err();

        assert!(matches!(
            err,
            DockerfileError::InvalidCommand {
                command: CommandKind::Onbuild,
                wrapped: CommandKind::From,
            }
        ));
    }
}
