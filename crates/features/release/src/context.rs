//! Everything a task needs to know about the current invocation.

use crate::error::TaskError;
use bix_domain::config::BixConfig;
use bix_domain::project::ProjectMetadata;
use bix_domain::registry::{Channel, ImageRef, RegistryConfig};
use bix_exec::CommandRunner;
use bix_exec::docker::Docker;
use bix_exec::ecr::Ecr;
use bix_exec::git::Git;
use bix_exec::python::Python;
use fxhash::FxHashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Snapshot of the environment variables the tasks read.
///
/// Captured once so that tasks never touch the process environment directly. Empty
/// values count as unset, and variables whose name or value is not UTF-8 are left out.
#[derive(Debug, Clone, Default)]
pub struct TaskEnv {
    vars: FxHashMap<String, String>,
}

impl TaskEnv {
    #[must_use]
    pub fn from_process() -> Self {
        Self::from_os(std::env::vars_os())
    }

    #[must_use]
    pub fn from_os(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        vars.into_iter()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// # Errors
    /// [`TaskError::MissingEnv`] when the variable is unset or empty.
    pub fn require(&self, name: &str) -> Result<&str, TaskError> {
        self.get(name).ok_or_else(|| TaskError::MissingEnv { name: name.to_owned(), context: None })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TaskEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

#[derive(Debug)]
pub struct TaskContext<'a> {
    pub config: BixConfig,
    pub project: ProjectMetadata,
    /// Directory holding `.yo-rc.json`, `package.json` and the Dockerfile.
    pub project_dir: PathBuf,
    pub env: TaskEnv,
    /// Skip local filesystem changes; commands are still handed to the runner.
    pub dry_run: bool,
    runner: &'a dyn CommandRunner,
}

impl<'a> TaskContext<'a> {
    pub fn new(
        config: BixConfig,
        project: ProjectMetadata,
        project_dir: impl Into<PathBuf>,
        env: TaskEnv,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self { config, project, project_dir: project_dir.into(), env, dry_run: false, runner }
    }

    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn docker(&self) -> Docker<'a> {
        Docker::new(self.runner).current_dir(&self.project_dir)
    }

    pub fn ecr<'b>(&'b self, registry: &'b RegistryConfig, profile: Option<&'b str>) -> Ecr<'b> {
        Ecr::new(self.runner, registry, profile)
    }

    pub fn git(&self) -> Git<'a> {
        Git::new(self.runner, &self.project_dir)
    }

    pub const fn python(&self) -> Python<'a> {
        Python::new(self.runner)
    }

    /// Resolves `path` against the project directory.
    pub fn path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.project_dir.join(path)
    }

    /// `$HOME`, when set.
    pub fn home(&self) -> Option<PathBuf> {
        self.env.get("HOME").map(PathBuf::from)
    }

    /// Repository of this tool in `channel`.
    pub fn repository(&self, channel: Channel) -> String {
        self.config.channels.repository(channel, &self.project.tool)
    }

    /// `<registry host>/<repository>:<version>`.
    pub fn image(&self, registry: &RegistryConfig, repository: &str) -> ImageRef {
        ImageRef {
            host: registry.host(),
            repository: repository.to_owned(),
            tag: self.project.version.clone(),
        }
    }
}
