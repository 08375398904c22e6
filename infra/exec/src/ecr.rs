//! AWS ECR through the `aws` CLI.

use crate::command::Cmd;
use crate::docker::Docker;
use crate::error::{ExecError, ExecErrorExt};
use crate::runner::CommandRunner;
use bix_domain::registry::{RegistryConfig, ReleaseStatus, RepositoryPolicy};
use tracing::{debug, info};

const LOGIN_USER: &str = "AWS";

/// One registry seen through one AWS profile.
#[derive(Debug, Clone, Copy)]
pub struct Ecr<'a> {
    runner: &'a dyn CommandRunner,
    registry: &'a RegistryConfig,
    profile: Option<&'a str>,
}

impl<'a> Ecr<'a> {
    pub const fn new(runner: &'a dyn CommandRunner, registry: &'a RegistryConfig, profile: Option<&'a str>) -> Self {
        Self { runner, registry, profile }
    }

    pub const fn registry(&self) -> &RegistryConfig {
        self.registry
    }

    fn scoped(&self, cmd: Cmd) -> Cmd {
        cmd.arg(format!("--region={}", self.registry.region)).opt_arg("--profile", self.profile)
    }

    /// `aws ecr get-login-password`.
    ///
    /// # Errors
    /// Propagates [`ExecError`] from the runner.
    pub fn login_password(&self) -> Result<String, ExecError> {
        let cmd = self.scoped(aws_ecr("get-login-password"));
        self.runner.output(&cmd)
    }

    /// Logs docker in to this registry with a fresh ECR password.
    ///
    /// # Errors
    /// Propagates [`ExecError`] from either command, with the registry host as context.
    pub fn login(&self) -> Result<(), ExecError> {
        let host = self.registry.host();
        let password = self.login_password().context(host.clone())?;
        Docker::new(self.runner).login(&host, LOGIN_USER, &password).context(host)
    }

    /// # Errors
    /// [`ExecError::Spawn`] when `aws` cannot be started.
    pub fn repository_exists(&self, repository: &str) -> Result<bool, ExecError> {
        let cmd = self.scoped(
            aws_ecr("describe-repositories")
                .arg(format!("--registry-id={}", self.registry.registry_id))
                .arg(format!("--repository-names={repository}")),
        );
        self.runner.probe(&cmd)
    }

    /// # Errors
    /// [`ExecError::Spawn`] when `aws` cannot be started.
    pub fn image_exists(&self, repository: &str, tag: &str) -> Result<bool, ExecError> {
        let cmd = self.scoped(
            aws_ecr("describe-images")
                .arg(format!("--registry-id={}", self.registry.registry_id))
                .arg(format!("--repository-name={repository}"))
                .arg(format!("--image-ids=imageTag={tag}")),
        );
        self.runner.probe(&cmd)
    }

    /// Checks whether `tag` has already been pushed to `repository`. The image lookup is
    /// skipped when the repository itself does not exist.
    ///
    /// # Errors
    /// [`ExecError::Spawn`] when `aws` cannot be started.
    pub fn release_status(&self, repository: &str, tag: &str) -> Result<ReleaseStatus, ExecError> {
        if !self.repository_exists(repository)? {
            debug!(host = %self.registry.host(), repository, "Repository does not exist yet");
            return Ok(ReleaseStatus::Unreleased { repository_exists: false });
        }
        if self.image_exists(repository, tag)? {
            return Ok(ReleaseStatus::Released);
        }
        Ok(ReleaseStatus::Unreleased { repository_exists: true })
    }

    /// Creates the repository. Returns `false` when creation fails, which for ECR means
    /// the repository is already there.
    ///
    /// # Errors
    /// [`ExecError::Spawn`] when `aws` cannot be started.
    pub fn create_repository(&self, repository: &str) -> Result<bool, ExecError> {
        let cmd =
            self.scoped(aws_ecr("create-repository").arg("--repository-name").arg(repository));
        let created = self.runner.probe(&cmd)?;
        if created {
            info!(host = %self.registry.host(), repository, "Created repository");
        }
        Ok(created)
    }

    /// Applies `policy` to the repository, passing the document inline as JSON.
    ///
    /// # Errors
    /// [`ExecError::Internal`] if the policy cannot be serialized, otherwise propagates
    /// [`ExecError`] from the runner.
    pub fn set_repository_policy(&self, repository: &str, policy: &RepositoryPolicy) -> Result<(), ExecError> {
        let text = serde_json::to_string(policy)
            .map_err(|e| ExecError::from(e.to_string()))
            .context("serializing repository policy")?;
        let cmd = self.scoped(
            aws_ecr("set-repository-policy")
                .arg("--repository-name")
                .arg(repository)
                .arg("--policy-text")
                .arg(text),
        );
        self.runner.run(&cmd)
    }
}

fn aws_ecr(subcommand: &str) -> Cmd {
    Cmd::new("aws").arg("ecr").arg(subcommand)
}
