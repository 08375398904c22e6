//! Docker CLI invocations.

use crate::command::Cmd;
use crate::error::ExecError;
use crate::runner::CommandRunner;
use bix_domain::registry::ImageRef;
use std::path::{Path, PathBuf};

/// `docker build` arguments.
#[derive(Debug, Clone)]
pub struct BuildSpec {
    pub dockerfile: PathBuf,
    pub context: PathBuf,
    pub tag: String,
    pub no_cache: bool,
    build_args: Vec<(String, String, bool)>,
}

impl BuildSpec {
    pub fn new(tag: impl Into<String>, dockerfile: impl Into<PathBuf>, context: impl Into<PathBuf>) -> Self {
        Self {
            dockerfile: dockerfile.into(),
            context: context.into(),
            tag: tag.into(),
            no_cache: false,
            build_args: Vec::new(),
        }
    }

    #[must_use]
    pub const fn no_cache(mut self, no_cache: bool) -> Self {
        self.no_cache = no_cache;
        self
    }

    #[must_use]
    pub fn build_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.build_args.push((name.into(), value.into(), false));
        self
    }

    /// A build argument whose value is redacted from logs (credentials).
    #[must_use]
    pub fn secret_build_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.build_args.push((name.into(), value.into(), true));
        self
    }

    fn to_cmd(&self, docker: Cmd) -> Cmd {
        let mut cmd = docker
            .arg("build")
            .arg(format!("--no-cache={}", self.no_cache))
            .arg("-f")
            .arg(self.dockerfile.display().to_string());

        for (name, value, secret) in &self.build_args {
            cmd = cmd.arg("--build-arg");
            cmd = if *secret {
                cmd.secret_arg(format!("{name}={value}"))
            } else {
                cmd.arg(format!("{name}={value}"))
            };
        }

        cmd.arg("-t").arg(&self.tag).arg(self.context.display().to_string())
    }
}

/// `docker run` arguments: bind mounts, optional working dir and entrypoint override.
#[derive(Debug, Clone)]
pub struct RunSpec {
    pub image: String,
    pub volumes: Vec<(PathBuf, String)>,
    pub workdir: Option<String>,
    pub entrypoint: Option<String>,
    pub args: Vec<String>,
}

impl RunSpec {
    pub fn new(image: impl Into<String>) -> Self {
        Self { image: image.into(), volumes: Vec::new(), workdir: None, entrypoint: None, args: Vec::new() }
    }

    #[must_use]
    pub fn volume(mut self, host: impl AsRef<Path>, container: impl Into<String>) -> Self {
        self.volumes.push((host.as_ref().to_path_buf(), container.into()));
        self
    }

    #[must_use]
    pub fn workdir(mut self, dir: impl Into<String>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn entrypoint(mut self, entrypoint: impl Into<String>) -> Self {
        self.entrypoint = Some(entrypoint.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    fn to_cmd(&self, docker: Cmd) -> Cmd {
        let mut cmd = docker.arg("run");
        for (host, container) in &self.volumes {
            cmd = cmd.arg("-v").arg(format!("{}:{container}", host.display()));
        }
        cmd.opt_arg("--workdir", self.workdir.as_deref())
            .opt_arg("--entrypoint", self.entrypoint.as_deref())
            .arg(&self.image)
            .args(self.args.iter().cloned())
    }
}

#[derive(Debug, Clone)]
pub struct Docker<'a> {
    runner: &'a dyn CommandRunner,
    dir: Option<PathBuf>,
}

impl<'a> Docker<'a> {
    pub const fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner, dir: None }
    }

    /// Runs every command from `dir`, so relative build paths resolve against it.
    #[must_use]
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.dir = Some(dir.as_ref().to_path_buf());
        self
    }

    fn docker(&self) -> Cmd {
        let cmd = Cmd::new("docker");
        match &self.dir {
            Some(dir) => cmd.current_dir(dir),
            None => cmd,
        }
    }

    /// # Errors
    /// Propagates [`ExecError`] from the runner.
    pub fn build(&self, spec: &BuildSpec) -> Result<(), ExecError> {
        self.runner.run(&spec.to_cmd(self.docker()))
    }

    /// # Errors
    /// Propagates [`ExecError`] from the runner.
    pub fn run(&self, spec: &RunSpec) -> Result<(), ExecError> {
        self.runner.run(&spec.to_cmd(self.docker()))
    }

    /// Tags the local image `source` as `target`.
    ///
    /// # Errors
    /// Propagates [`ExecError`] from the runner.
    pub fn tag(&self, source: &str, target: &ImageRef) -> Result<(), ExecError> {
        self.runner.run(&self.docker().arg("tag").arg(source).arg(target.to_string()))
    }

    /// # Errors
    /// Propagates [`ExecError`] from the runner.
    pub fn push(&self, image: &ImageRef) -> Result<(), ExecError> {
        self.runner.run(&self.docker().arg("push").arg(image.to_string()))
    }

    /// `docker login` with the password on stdin.
    ///
    /// # Errors
    /// Propagates [`ExecError`] from the runner.
    pub fn login(&self, host: &str, username: &str, password: &str) -> Result<(), ExecError> {
        self.runner.run(
            &self.docker()
                .arg("login")
                .arg("--username")
                .arg(username)
                .arg("--password-stdin")
                .arg(host)
                .stdin(password),
        )
    }

    /// # Errors
    /// Propagates [`ExecError`] from the runner.
    pub fn version(&self) -> Result<(), ExecError> {
        self.runner.run(&self.docker().arg("--version"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingRunner;

    #[test]
    fn build_passes_credentials_as_secret_build_args() {
        let runner = RecordingRunner::new();
        let spec = BuildSpec::new("hla-typer", "docker/Dockerfile", ".")
            .no_cache(true)
            .build_arg("USER", "ci")
            .secret_build_arg("KEY", "s3cr3t");

        Docker::new(&runner).build(&spec).unwrap();

        let calls = runner.calls();
        assert_eq!(
            calls[0].unredacted_line(),
            "docker build --no-cache=true -f docker/Dockerfile --build-arg USER=ci --build-arg KEY=s3cr3t -t hla-typer ."
        );
        assert!(!calls[0].to_string().contains("s3cr3t"));
    }

    #[test]
    fn run_orders_mounts_workdir_and_entrypoint_before_image() {
        let runner = RecordingRunner::new();
        let spec = RunSpec::new("hla-typer")
            .volume("/work/docs", "/opt/project/docs")
            .workdir("/opt/project/docs")
            .entrypoint("sh")
            .args(["/opt/project/docs/build_docs.sh", "1.0.0"]);

        Docker::new(&runner).run(&spec).unwrap();

        assert_eq!(
            runner.lines(),
            vec![
                "docker run -v /work/docs:/opt/project/docs --workdir /opt/project/docs --entrypoint sh hla-typer /opt/project/docs/build_docs.sh 1.0.0"
            ]
        );
    }

    #[test]
    fn login_sends_password_on_stdin() {
        let runner = RecordingRunner::new();
        Docker::new(&runner).login("registry.example", "AWS", "pw").unwrap();

        let calls = runner.calls();
        let call = &calls[0];
        assert_eq!(call.unredacted_line(), "docker login --username AWS --password-stdin registry.example");
        assert_eq!(call.stdin_payload(), Some("pw"));
    }
}
