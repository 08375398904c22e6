use crate::command::Cmd;
use crate::error::{ExecError, ExecErrorExt};
use std::fmt::Debug;
use std::io::Write;
use std::process::{Output, Stdio};
use tracing::{debug, info};

/// Executes [`Cmd`]s. Tasks only talk to this trait, so the same task code drives real
/// processes, dry runs and test doubles.
pub trait CommandRunner: Debug {
    /// Runs with inherited stdout/stderr.
    ///
    /// # Errors
    /// [`ExecError::Spawn`] if the program cannot start, [`ExecError::Failed`] on a
    /// non-zero exit.
    fn run(&self, cmd: &Cmd) -> Result<(), ExecError>;

    /// Runs quietly and reports whether the command succeeded. A non-zero exit is an
    /// answer, not an error.
    ///
    /// # Errors
    /// [`ExecError::Spawn`] if the program cannot start.
    fn probe(&self, cmd: &Cmd) -> Result<bool, ExecError>;

    /// Runs and returns stdout with surrounding whitespace trimmed; stderr is inherited.
    ///
    /// # Errors
    /// [`ExecError::Spawn`] if the program cannot start, [`ExecError::Failed`] on a
    /// non-zero exit.
    fn output(&self, cmd: &Cmd) -> Result<String, ExecError>;
}

/// Runs commands as child processes of `bix`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn execute(cmd: &Cmd, stdout: Stdio, stderr: Stdio) -> Result<Output, ExecError> {
        let mut command = cmd.to_command();
        command.stdout(stdout).stderr(stderr);
        command.stdin(if cmd.stdin_payload().is_some() { Stdio::piped() } else { Stdio::null() });

        let mut child = command.spawn().context(cmd.to_string())?;

        if let Some(payload) = cmd.stdin_payload()
            && let Some(mut stdin) = child.stdin.take()
        {
            stdin.write_all(payload.as_bytes()).context(cmd.to_string())?;
        }

        child.wait_with_output().context(cmd.to_string())
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &Cmd) -> Result<(), ExecError> {
        info!("$ {cmd}");
        let output = Self::execute(cmd, Stdio::inherit(), Stdio::inherit())?;
        ensure_success(cmd, &output)
    }

    fn probe(&self, cmd: &Cmd) -> Result<bool, ExecError> {
        debug!("? {cmd}");
        let output = Self::execute(cmd, Stdio::null(), Stdio::null())?;
        Ok(output.status.success())
    }

    fn output(&self, cmd: &Cmd) -> Result<String, ExecError> {
        debug!("$ {cmd}");
        let output = Self::execute(cmd, Stdio::piped(), Stdio::inherit())?;
        ensure_success(cmd, &output)?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
    }
}

/// Prints every command instead of running it. Probes answer "no" (nothing exists yet),
/// captured output is a placeholder.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunRunner;

/// Stand-in stdout for [`DryRunRunner::output`].
pub const DRY_RUN_OUTPUT: &str = "<dry-run>";

impl DryRunRunner {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[allow(clippy::print_stdout)]
    fn show(prefix: &str, cmd: &Cmd) {
        info!(dry_run = true, "{prefix} {cmd}");
        println!("{prefix} {cmd}");
    }
}

impl CommandRunner for DryRunRunner {
    fn run(&self, cmd: &Cmd) -> Result<(), ExecError> {
        Self::show("$", cmd);
        Ok(())
    }

    fn probe(&self, cmd: &Cmd) -> Result<bool, ExecError> {
        Self::show("?", cmd);
        Ok(false)
    }

    fn output(&self, cmd: &Cmd) -> Result<String, ExecError> {
        Self::show("$", cmd);
        Ok(DRY_RUN_OUTPUT.to_owned())
    }
}

fn ensure_success(cmd: &Cmd, output: &Output) -> Result<(), ExecError> {
    if output.status.success() {
        return Ok(());
    }
    Err(ExecError::Failed { command: cmd.to_string(), status: output.status.to_string(), context: None })
}
