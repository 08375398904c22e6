//! Local virtualenv for the helper tooling.

use crate::command::Cmd;
use crate::error::ExecError;
use crate::runner::CommandRunner;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub struct Python<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> Python<'a> {
    pub const fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// `virtualenv <dir>`.
    ///
    /// # Errors
    /// Propagates [`ExecError`] from the runner.
    pub fn virtualenv(&self, dir: &Path) -> Result<(), ExecError> {
        self.runner.run(&Cmd::new("virtualenv").arg(dir.display().to_string()))
    }

    /// Installs `packages` with the venv's own pip. Nothing runs for an empty list.
    ///
    /// # Errors
    /// Propagates [`ExecError`] from the runner.
    pub fn pip_install(&self, venv: &Path, packages: &[String]) -> Result<(), ExecError> {
        if packages.is_empty() {
            return Ok(());
        }
        let pip = pip_path(venv);
        self.runner.run(&Cmd::new(pip.display().to_string()).arg("install").args(packages.iter().cloned()))
    }
}

/// `<venv>/bin/pip`.
#[must_use]
pub fn pip_path(venv: &Path) -> PathBuf {
    venv.join("bin").join("pip")
}
