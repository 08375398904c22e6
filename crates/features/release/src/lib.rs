//! # Release Tasks
//!
//! The build, test, documentation and publishing tasks of a containerized BIX tool. Each
//! task is a fixed sequence of Docker, AWS CLI, git and pip invocations issued through
//! the [`CommandRunner`](bix_exec::CommandRunner) held by the [`TaskContext`]; the first
//! failing step aborts the task.
//!
//! ## Release guard
//!
//! [`Task::PublishRelease`] checks every registry for the version before pushing
//! anything and fails with [`TaskError::AlreadyReleased`] when one already has it. The
//! git tag is created only after every registry received the image.

mod context;
mod credentials;
mod error;
mod tasks;

pub use crate::context::{TaskContext, TaskEnv};
pub use crate::error::{TaskError, TaskErrorExt};
use strum_macros::{AsRefStr, Display, EnumString};
use tracing::info;

/// The tasks `bix` can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Task {
    Build,
    /// `check-released`, `init-ecr` and `init-venv`, in that order.
    Init,
    CheckReleased,
    InitEcr,
    InitVenv,
    Docs,
    Test,
    PublishSnapshot,
    PublishRelease,
}

impl Task {
    /// The steps this task runs, composite tasks expanded.
    #[must_use]
    pub const fn steps(self) -> &'static [Self] {
        match self {
            Self::Init => &[Self::CheckReleased, Self::InitEcr, Self::InitVenv],
            Self::Build => &[Self::Build],
            Self::CheckReleased => &[Self::CheckReleased],
            Self::InitEcr => &[Self::InitEcr],
            Self::InitVenv => &[Self::InitVenv],
            Self::Docs => &[Self::Docs],
            Self::Test => &[Self::Test],
            Self::PublishSnapshot => &[Self::PublishSnapshot],
            Self::PublishRelease => &[Self::PublishRelease],
        }
    }
}

/// Runs `task` to completion or to its first failing step.
///
/// # Errors
/// Returns the [`TaskError`] of the first failing step.
pub fn run(task: Task, ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    for &step in task.steps() {
        let _span = tracing::info_span!("task", name = %step, project = %ctx.project).entered();
        info!("Starting");
        run_step(step, ctx)?;
        info!("Done");
    }
    Ok(())
}

fn run_step(step: Task, ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    match step {
        Task::Build => tasks::build(ctx),
        Task::Init => Err(TaskError::from("`init` is not a single step")),
        Task::CheckReleased => tasks::check_released(ctx),
        Task::InitEcr => tasks::init_ecr(ctx),
        Task::InitVenv => tasks::init_venv(ctx),
        Task::Docs => tasks::docs(ctx),
        Task::Test => tasks::test(ctx),
        Task::PublishSnapshot => tasks::publish_snapshot(ctx),
        Task::PublishRelease => tasks::publish_release(ctx),
    }
}
