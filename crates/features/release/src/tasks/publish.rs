use super::ensure_unreleased;
use crate::context::TaskContext;
use crate::error::TaskError;
use bix_domain::constants::{GIT_TOKEN, GIT_USER, LATEST_TAG};
use bix_domain::registry::{Channel, RegistryConfig, RepositoryPolicy};
use bix_exec::git::authenticated_url;
use tracing::info;

/// Pushes the version to the sandbox repository of every snapshot registry. No version
/// gate: snapshots may be overwritten.
pub(crate) fn publish_snapshot(ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    let repository = ctx.repository(Channel::Sandbox);
    for (key, registry) in ctx.config.registries.iter().filter(|(_, r)| r.snapshot) {
        info!(registry = %key, %repository, "Publishing snapshot");
        publish_to(ctx, registry, &repository, false)?;
    }
    Ok(())
}

/// Releases the version: every registry is checked for a duplicate before anything is
/// pushed, then each registry receives the image, and the git tag is pushed last.
pub(crate) fn publish_release(ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    let git_user = ctx.env.require(GIT_USER)?;
    let git_token = ctx.env.require(GIT_TOKEN)?;
    let repository = ctx.repository(Channel::Release);

    for (_, registry) in ctx.config.registries.iter() {
        let ecr = ctx.ecr(registry, registry.publish_profile.as_deref());
        ensure_unreleased(ctx, &ecr, &repository)?;
    }

    for (key, registry) in ctx.config.registries.iter() {
        info!(registry = %key, %repository, "Publishing release");
        publish_to(ctx, registry, &repository, registry.push_latest)?;
    }

    tag_release(ctx, git_user, git_token)
}

fn publish_to(
    ctx: &TaskContext<'_>,
    registry: &RegistryConfig,
    repository: &str,
    push_latest: bool,
) -> Result<(), TaskError> {
    let ecr = ctx.ecr(registry, registry.publish_profile.as_deref());
    ecr.login()?;

    if ecr.create_repository(repository)?
        && let Some(grant) = &registry.policy
    {
        ecr.set_repository_policy(repository, &RepositoryPolicy::from(grant))?;
    }

    let docker = ctx.docker();
    let image = ctx.image(registry, repository);
    docker.tag(&ctx.project.tool, &image)?;
    docker.push(&image)?;

    if push_latest {
        let latest = image.with_tag(LATEST_TAG);
        docker.tag(&ctx.project.tool, &latest)?;
        docker.push(&latest)?;
    }
    info!(%image, push_latest, "Pushed");
    Ok(())
}

fn tag_release(ctx: &TaskContext<'_>, user: &str, token: &str) -> Result<(), TaskError> {
    let cfg = &ctx.config.git;
    let version = &ctx.project.version;
    let git = ctx.git();

    let url = authenticated_url(&git.remote_url(&cfg.remote)?, user, token);
    git.configure_identity(user, &format!("{user}@{}", cfg.email_domain))?;
    git.tag(version)?;
    git.push_tag(&url, version)?;
    info!(tag = %version, "Tagged release");
    Ok(())
}
