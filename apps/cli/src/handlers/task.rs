use crate::models::args::Cli;
use anyhow::Context;
use bix_exec::{CommandRunner, DryRunRunner, SystemRunner};
use bix_kernel::config::load_config;
use bix_kernel::project::load_project;
use bix_release::{Task, TaskContext, TaskEnv};
use tracing::info;

/// Resolves the project and runs `task` against it.
///
/// # Errors
/// Returns an error if the project directory, configuration or project files cannot be
/// read, or if the task fails.
pub fn run_task(cli: &Cli, task: Task) -> anyhow::Result<()> {
    let project_dir = cli
        .project_dir
        .canonicalize()
        .with_context(|| format!("Project directory {} is not accessible", cli.project_dir.display()))?;

    let cfg = load_config(cli.config.as_deref(), &project_dir).context("Configuration is malformed")?;
    let project =
        load_project(&project_dir, &cfg.project).context("Cannot resolve the tool name and version")?;

    let runner: Box<dyn CommandRunner> =
        if cli.dry_run { Box::new(DryRunRunner::new()) } else { Box::new(SystemRunner::new()) };

    info!(%task, %project, dir = %project_dir.display(), dry_run = cli.dry_run, "Running task");
    let ctx = TaskContext::new(cfg, project, project_dir, TaskEnv::from_process(), runner.as_ref())
        .dry_run(cli.dry_run);

    bix_release::run(task, &ctx).with_context(|| format!("Task `{task}` failed"))
}
