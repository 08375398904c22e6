use crate::context::TaskContext;
use crate::error::{TaskError, TaskErrorExt};
use bix_domain::config::TestConfig;
use bix_exec::docker::RunSpec;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// Runs the project's test suite inside the image. Reports (JSON, JUnit XML, HTML and
/// coverage) land in a freshly emptied results directory on the host.
pub(crate) fn test(ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    let cfg = &ctx.config.test;
    let results = results_dir(ctx, &cfg.results_dir)?;
    reset_dir(ctx, &results)?;

    let spec = RunSpec::new(ctx.project.tool.clone())
        .volume(&results, cfg.scratch.clone())
        .entrypoint("py.test")
        .args(pytest_args(cfg));

    ctx.docker().run(&spec)?;
    Ok(())
}

fn pytest_args(cfg: &TestConfig) -> Vec<String> {
    let scratch = cfg.scratch.trim_end_matches('/');
    let mut args = vec![
        "--verbose".to_owned(),
        "--json".to_owned(),
        format!("{scratch}/all_tests_results.json"),
        format!("--junitxml={scratch}/all_tests_results.xml"),
        format!("--html={scratch}/all_tests_results.html"),
        format!("--cov={}", cfg.source_dir),
        format!("--cov-report=html:{scratch}/all_tests_cov_report.html"),
    ];
    args.extend(cfg.ignore.iter().map(|path| format!("--ignore={path}")));
    args.push(cfg.tests_dir.clone());
    args
}

/// Resolves the configured results directory. It is removed wholesale, so it must be a
/// relative path below the project directory.
fn results_dir(ctx: &TaskContext<'_>, configured: &Path) -> Result<PathBuf, TaskError> {
    let inside = configured.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        && configured.components().any(|c| matches!(c, Component::Normal(_)));
    if !inside {
        return Err(TaskError::UnsafePath { path: configured.display().to_string(), context: None });
    }
    Ok(ctx.path(configured))
}

fn reset_dir(ctx: &TaskContext<'_>, dir: &Path) -> Result<(), TaskError> {
    if ctx.dry_run {
        info!(dir = %dir.display(), dry_run = true, "Would recreate results directory");
        return Ok(());
    }
    if dir.exists() {
        fs::remove_dir_all(dir).context(dir.display().to_string())?;
    }
    fs::create_dir_all(dir).context(dir.display().to_string())?;
    info!(dir = %dir.display(), "Recreated results directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pytest_invocation() {
        assert_eq!(
            pytest_args(&TestConfig::default()).join(" "),
            "--verbose --json /scratch/all_tests_results.json \
             --junitxml=/scratch/all_tests_results.xml \
             --html=/scratch/all_tests_results.html \
             --cov=/opt/project/src \
             --cov-report=html:/scratch/all_tests_cov_report.html \
             --ignore=/opt/project/tests/dpl_tests /opt/project/tests"
        );
    }
}
