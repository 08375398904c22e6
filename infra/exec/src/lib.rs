//! # Exec
//!
//! Every side effect of the bix tasks is an external command. This crate describes those
//! commands ([`Cmd`]), runs them through a [`CommandRunner`], and wraps the individual
//! tools so that tasks read as a sequence of intent rather than argument vectors.
//!
//! * [`SystemRunner`] spawns real processes and stops at the first failure.
//! * [`DryRunRunner`] prints what would run.
//! * `testing::RecordingRunner` (feature `testing`) records calls and answers probes
//!   from scripted rules.
//!
//! Arguments added with [`Cmd::secret_arg`] and stdin payloads are redacted wherever a
//! command is displayed or logged.

mod command;
mod error;
mod runner;

pub mod docker;
pub mod ecr;
pub mod git;
pub mod python;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use crate::command::Cmd;
pub use crate::error::{ExecError, ExecErrorExt};
pub use crate::runner::{CommandRunner, DRY_RUN_OUTPUT, DryRunRunner, SystemRunner};
