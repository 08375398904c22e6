use super::ensure_unreleased;
use crate::context::TaskContext;
use crate::credentials;
use crate::error::{TaskError, TaskErrorExt};
use bix_domain::registry::Channel;
use std::fs;
use tracing::{debug, info};

/// Verifies that no registry already holds the project version in its release repository.
///
/// Registries are visited in publishing order. Profiles fed from the environment are
/// written to the AWS credentials file first, and registries checked through a profile
/// are logged in to before the lookup.
pub(crate) fn check_released(ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    let repository = ctx.repository(Channel::Release);

    for (key, registry) in ctx.config.registries.iter() {
        let profile = registry.check_profile.as_deref();
        if registry.credentials_from_env
            && let Some(profile) = profile
        {
            credentials::ensure_profile(ctx, profile)?;
        }

        let ecr = ctx.ecr(registry, profile);
        if profile.is_some() {
            ecr.login()?;
        }
        debug!(registry = %key, %repository, "Checking release status");
        ensure_unreleased(ctx, &ecr, &repository)?;
    }
    Ok(())
}

/// Logs docker in to the US registry and reports the docker version.
pub(crate) fn init_ecr(ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    let us = &ctx.config.registries.us;
    ctx.ecr(us, us.check_profile.as_deref()).login()?;
    ctx.docker().version()?;
    Ok(())
}

/// Creates the local virtualenv, seeds it with the user's pip configuration when there
/// is one, and installs the helper packages.
pub(crate) fn init_venv(ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    let cfg = &ctx.config.venv;
    let venv = ctx.path(&cfg.dir);
    let python = ctx.python();

    python.virtualenv(&venv)?;

    if let Some(pip_conf) = ctx.home().map(|home| home.join(&cfg.pip_conf))
        && pip_conf.is_file()
    {
        let target = venv.join("pip.conf");
        if ctx.dry_run {
            info!(from = %pip_conf.display(), to = %target.display(), dry_run = true, "Would copy pip configuration");
        } else {
            fs::copy(&pip_conf, &target).context(target.display().to_string())?;
            info!(from = %pip_conf.display(), to = %target.display(), "Copied pip configuration");
        }
    }

    python.pip_install(&venv, &cfg.packages)?;
    Ok(())
}
