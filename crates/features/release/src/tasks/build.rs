use crate::context::TaskContext;
use crate::error::TaskError;
use bix_domain::constants::{ARTIFACTORY_APIKEY, ARTIFACTORY_USERNAME};
use bix_exec::docker::BuildSpec;

/// Builds the tool image from the project's Dockerfile, tagged with the tool name.
/// Artifactory credentials are passed as the `USER` and `KEY` build arguments.
pub(crate) fn build(ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    let user = ctx.env.require(ARTIFACTORY_USERNAME)?;
    let key = ctx.env.require(ARTIFACTORY_APIKEY)?;
    let cfg = &ctx.config.build;

    let spec = BuildSpec::new(ctx.project.tool.clone(), cfg.dockerfile.clone(), cfg.context.clone())
        .no_cache(cfg.no_cache)
        .build_arg("USER", user)
        .secret_build_arg("KEY", key);

    ctx.docker().build(&spec)?;
    Ok(())
}
