//! Environment variable names read by the tasks.

/// Artifactory user passed to `docker build` as the `USER` build argument.
pub const ARTIFACTORY_USERNAME: &str = "ARTIFACTORY_USERNAME";
/// Artifactory API key passed to `docker build` as the `KEY` build argument.
pub const ARTIFACTORY_APIKEY: &str = "ARTIFACTORY_APIKEY";

/// Git user for tagging releases.
pub const GIT_USER: &str = "GIT_USER";
/// Git token injected into the push URL.
pub const GIT_TOKEN: &str = "GIT_TOKEN";

/// Suffix of the variable holding the access key id of an AWS profile (`<profile>_ak`).
pub const ACCESS_KEY_SUFFIX: &str = "_ak";
/// Suffix of the variable holding the secret access key of an AWS profile (`<profile>_sk`).
pub const SECRET_KEY_SUFFIX: &str = "_sk";

/// Tag pushed alongside the version when a registry tracks `latest`.
pub const LATEST_TAG: &str = "latest";
