//! Container registry coordinates and image references.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{AsRefStr, Display, EnumString};

/// The two registries a tool is published to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RegistryKey {
    Us,
    Cn,
}

/// Publishing channel. Snapshots go to the sandbox prefix without a version gate,
/// releases go to the release prefix and must not overwrite an existing version.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Channel {
    Sandbox,
    Release,
}

/// One ECR registry (account + region).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub registry_id: String,
    pub region: String,
    /// DNS suffix of the partition, `amazonaws.com` or `amazonaws.com.cn`.
    pub domain_suffix: String,
    /// AWS profile for login and release checks during `init`.
    pub check_profile: Option<String>,
    /// AWS profile for login, repository management and pushes while publishing.
    pub publish_profile: Option<String>,
    /// Write `check_profile` into the AWS credentials file from `<profile>_ak`/`<profile>_sk`
    /// when it is missing.
    pub credentials_from_env: bool,
    /// Receives snapshot publishes.
    pub snapshot: bool,
    /// Also tag and push `latest` on release.
    pub push_latest: bool,
    /// Access policy applied once, right after the repository is created.
    pub policy: Option<PolicyGrant>,
}

impl RegistryConfig {
    /// Default US registry (`us-west-2`).
    #[must_use]
    pub fn us() -> Self {
        Self {
            registry_id: "205134639408".to_owned(),
            region: "us-west-2".to_owned(),
            domain_suffix: "amazonaws.com".to_owned(),
            check_profile: None,
            publish_profile: Some("master-teamcity-devops".to_owned()),
            credentials_from_env: false,
            snapshot: false,
            push_latest: false,
            policy: None,
        }
    }

    /// Default China registry (`cn-northwest-1`).
    #[must_use]
    pub fn cn() -> Self {
        Self {
            registry_id: "436227880023".to_owned(),
            region: "cn-northwest-1".to_owned(),
            domain_suffix: "amazonaws.com.cn".to_owned(),
            check_profile: Some("apollo8_bj_dev".to_owned()),
            publish_profile: Some("apollo8_bj_dev".to_owned()),
            credentials_from_env: true,
            snapshot: true,
            push_latest: true,
            policy: Some(PolicyGrant::default()),
        }
    }

    /// Registry endpoint, e.g. `205134639408.dkr.ecr.us-west-2.amazonaws.com`.
    #[must_use]
    pub fn host(&self) -> String {
        format!("{}.dkr.ecr.{}.{}", self.registry_id, self.region, self.domain_suffix)
    }
}

/// Cross-account pull permission granted on newly created repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyGrant {
    pub sid: String,
    pub principal: String,
    pub actions: Vec<String>,
}

impl Default for PolicyGrant {
    fn default() -> Self {
        Self {
            sid: "allow-bj-prod-cn".to_owned(),
            principal: "arn:aws-cn:iam::585145728788:root".to_owned(),
            actions: vec!["ecr:BatchGetImage".to_owned(), "ecr:GetDownloadUrlForLayer".to_owned()],
        }
    }
}

/// ECR repository policy document in the wire shape `set-repository-policy` expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RepositoryPolicy {
    pub version: String,
    pub statement: Vec<PolicyStatement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub sid: String,
    pub effect: String,
    pub principal: PolicyPrincipal,
    pub action: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyPrincipal {
    #[serde(rename = "AWS")]
    pub aws: String,
}

const POLICY_VERSION: &str = "2008-10-17";

impl From<&PolicyGrant> for RepositoryPolicy {
    fn from(grant: &PolicyGrant) -> Self {
        Self {
            version: POLICY_VERSION.to_owned(),
            statement: vec![PolicyStatement {
                sid: grant.sid.clone(),
                effect: "Allow".to_owned(),
                principal: PolicyPrincipal { aws: grant.principal.clone() },
                action: grant.actions.clone(),
            }],
        }
    }
}

/// Fully qualified image reference, rendered as `<host>/<repository>:<tag>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef {
    pub host: String,
    pub repository: String,
    pub tag: String,
}

impl ImageRef {
    #[must_use]
    pub fn with_tag(&self, tag: impl Into<String>) -> Self {
        Self { host: self.host.clone(), repository: self.repository.clone(), tag: tag.into() }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.host, self.repository, self.tag)
    }
}

/// Outcome of the duplicate-release check against one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseStatus {
    Unreleased { repository_exists: bool },
    Released,
}
