//! Test double for [`CommandRunner`].
//!
//! Rules match on substrings of the unredacted command line; the first matching rule wins.
//! Unmatched probes answer `false`, unmatched outputs are empty, unmatched runs succeed.

use crate::command::Cmd;
use crate::error::ExecError;
use crate::runner::CommandRunner;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Script {
    probes: Vec<(String, bool)>,
    outputs: Vec<(String, String)>,
    failures: Vec<String>,
}

/// Records every command it is asked to run and answers from scripted rules.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Cmd>>,
    script: Mutex<Script>,
}

impl RecordingRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Probes whose line contains `needle` answer `answer`.
    #[must_use]
    pub fn probe_when(self, needle: impl Into<String>, answer: bool) -> Self {
        lock(&self.script).probes.push((needle.into(), answer));
        self
    }

    /// Outputs whose line contains `needle` return `stdout`.
    #[must_use]
    pub fn output_when(self, needle: impl Into<String>, stdout: impl Into<String>) -> Self {
        lock(&self.script).outputs.push((needle.into(), stdout.into()));
        self
    }

    /// Runs and outputs whose line contains `needle` fail with [`ExecError::Failed`].
    #[must_use]
    pub fn fail_when(self, needle: impl Into<String>) -> Self {
        lock(&self.script).failures.push(needle.into());
        self
    }

    /// Every recorded command, in call order.
    pub fn calls(&self) -> Vec<Cmd> {
        lock(&self.calls).clone()
    }

    /// Unredacted lines of every recorded command, in call order.
    pub fn lines(&self) -> Vec<String> {
        lock(&self.calls).iter().map(Cmd::unredacted_line).collect()
    }

    /// Index of the first recorded command containing `needle`.
    pub fn position(&self, needle: &str) -> Option<usize> {
        self.lines().iter().position(|line| line.contains(needle))
    }

    /// Number of recorded commands containing `needle`.
    pub fn count(&self, needle: &str) -> usize {
        self.lines().iter().filter(|line| line.contains(needle)).count()
    }

    fn record(&self, cmd: &Cmd) -> Result<String, ExecError> {
        lock(&self.calls).push(cmd.clone());
        let line = cmd.unredacted_line();
        if lock(&self.script).failures.iter().any(|needle| line.contains(needle.as_str())) {
            return Err(ExecError::Failed {
                command: cmd.to_string(),
                status: "exit status: 1".to_owned(),
                context: None,
            });
        }
        Ok(line)
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, cmd: &Cmd) -> Result<(), ExecError> {
        self.record(cmd).map(drop)
    }

    fn probe(&self, cmd: &Cmd) -> Result<bool, ExecError> {
        lock(&self.calls).push(cmd.clone());
        let line = cmd.unredacted_line();
        Ok(lock(&self.script)
            .probes
            .iter()
            .find(|(needle, _)| line.contains(needle.as_str()))
            .is_some_and(|(_, answer)| *answer))
    }

    fn output(&self, cmd: &Cmd) -> Result<String, ExecError> {
        let line = self.record(cmd)?;
        Ok(lock(&self.script)
            .outputs
            .iter()
            .find(|(needle, _)| line.contains(needle.as_str()))
            .map(|(_, stdout)| stdout.clone())
            .unwrap_or_default())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
