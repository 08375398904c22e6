//! One module per task family. Every task is a straight sequence of steps that stops at
//! the first failure.

mod build;
mod docs;
mod init;
mod publish;
mod test;

pub(crate) use build::build;
pub(crate) use docs::docs;
pub(crate) use init::{check_released, init_ecr, init_venv};
pub(crate) use publish::{publish_release, publish_snapshot};
pub(crate) use test::test;

use crate::context::TaskContext;
use crate::error::TaskError;
use bix_domain::registry::ReleaseStatus;
use bix_exec::ecr::Ecr;
use tracing::info;

/// Fails with [`TaskError::AlreadyReleased`] when the project version is already in
/// `repository` on the registry behind `ecr`.
fn ensure_unreleased(ctx: &TaskContext<'_>, ecr: &Ecr<'_>, repository: &str) -> Result<(), TaskError> {
    let image = ctx.image(ecr.registry(), repository);
    match ecr.release_status(repository, &ctx.project.version)? {
        ReleaseStatus::Released => Err(TaskError::AlreadyReleased { image: image.to_string(), context: None }),
        ReleaseStatus::Unreleased { repository_exists } => {
            info!(%image, repository_exists, "Version has not been released");
            Ok(())
        },
    }
}
