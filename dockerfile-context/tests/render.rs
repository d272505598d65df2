use std::time::Duration;

use dockerfile_context::{
    core::commands::{
        AddFile, CommandKind, CopyFile, DockerfileCommand, Env, ExecCmd, ExecRun, FromImage,
        Healthcheck, Instruction, Onbuild, ShellCmd, ShellRun,
    },
    Dockerfile, DockerfileBuilder, DockerfileError,
};

#[test]
fn java_service_dockerfile() -> anyhow::Result<()> {
    let dockerfile = DockerfileBuilder::new()
        .exec_entrypoint("java", ["-jar", "/opt/app.jar"])
        .expose([8080, 8443])
        .copy("/tmp/build/app.jar", "/opt/app.jar")
        .env("JAVA_OPTS", "-Xmx512m")
        .from_tag("eclipse-temurin", "21-jre")
        .arg_with_default("PROFILE", "prod")
        .workdir("/opt")
        .user("app")
        .healthcheck(
            Healthcheck::cmd_shell("curl -f http://localhost:8080/health")
                .with_interval(Duration::from_secs(5))
                .with_timeout(Duration::from_millis(1500))
                .with_retries(5),
        )
        .label("org.opencontainers.image.title", "app")
        .onbuild(ShellRun::new("echo derived"))?
        .build();

    let expected = "\
FROM eclipse-temurin:21-jre
ARG PROFILE=prod
ENV JAVA_OPTS=-Xmx512m
COPY [\"/tmp/build/app.jar\", \"/opt/app.jar\"]
WORKDIR /opt
USER app
EXPOSE 8080 8443
ENTRYPOINT [\"java\", \"-jar\", \"/opt/app.jar\"]
LABEL \"org.opencontainers.image.title\"=\"app\"
HEALTHCHECK --interval=5s --timeout=1500ms --retries=5 CMD curl -f http://localhost:8080/health
ONBUILD RUN echo derived
";

    assert_eq!(dockerfile.render(), expected);
    Ok(())
}

#[test]
fn build_steps_keep_their_relative_order() {
    let dockerfile: Dockerfile = [
        Instruction::from(ShellRun::new("apt-get update")),
        AddFile::new("deps.tgz", "/deps/").into(),
        ExecRun::new("make", ["-C", "/deps"]).into(),
        FromImage::new("debian").into(),
        CopyFile::new("src", "/src").into(),
    ]
    .into_iter()
    .collect();

    let rendered = dockerfile.render();
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines,
        [
            "FROM debian",
            "RUN apt-get update",
            r#"ADD ["deps.tgz", "/deps/"]"#,
            r#"RUN ["make", "-C", "/deps"]"#,
            r#"COPY ["src", "/src"]"#,
        ]
    );
}

#[test]
fn render_is_repeatable() {
    let mut dockerfile = Dockerfile::new();
    dockerfile
        .add_command(Env::new("A", "1"))
        .add_command(FromImage::with_tag("alpine", "3.20"));

    assert_eq!(dockerfile.render(), dockerfile.render());
    assert_eq!(dockerfile.to_string(), dockerfile.render());
}

#[test]
fn healthcheck_only_wraps_cmd() {
    assert!(Healthcheck::new(ExecCmd::new("probe", ["--quick"])).is_ok());
    assert!(Healthcheck::new(ShellCmd::new("probe")).is_ok());

    let err = Healthcheck::new(ShellRun::new("probe")).unwrap_err();
    assert!(matches!(
        err,
        DockerfileError::InvalidCommand {
            command: CommandKind::Healthcheck,
            wrapped: CommandKind::ShellRun,
        }
    ));
}

#[test]
fn onbuild_cannot_nest() -> anyhow::Result<()> {
    let inner = Onbuild::new(CopyFile::new(".", "/src"))?;
    assert_eq!(inner.priority(), CommandKind::Onbuild.priority());

    let err = Onbuild::new(inner).unwrap_err();
    assert_eq!(
        err.to_string(),
        "onbuild command cannot wrap a onbuild command"
    );
    Ok(())
}
