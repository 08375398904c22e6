use crate::context::TaskContext;
use crate::error::TaskError;
use bix_exec::docker::RunSpec;

/// Runs the in-image docs build script over the mounted `docs/` directory, passing the
/// project version as its only argument.
pub(crate) fn docs(ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    let cfg = &ctx.config.docs;
    let registry = ctx.config.registries.get(cfg.registry);
    ctx.ecr(registry, registry.check_profile.as_deref()).login()?;

    let spec = RunSpec::new(ctx.project.tool.clone())
        .volume(ctx.path(&cfg.dir), cfg.mount.clone())
        .workdir(cfg.mount.clone())
        .entrypoint("sh")
        .args([cfg.script.clone(), ctx.project.version.clone()]);

    ctx.docker().run(&spec)?;
    Ok(())
}
