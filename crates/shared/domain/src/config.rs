use crate::registry::{Channel, RegistryConfig, RegistryKey};
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level tool configuration. Every section has defaults, so an empty `bix.toml`
/// (or none at all) reproduces the stock release setup.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BixConfigInner {
    pub project: ProjectFilesConfig,
    pub build: BuildConfig,
    pub channels: ChannelsConfig,
    pub registries: RegistriesConfig,
    pub docs: DocsConfig,
    pub test: TestConfig,
    pub venv: VenvConfig,
    pub git: GitConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into tasks.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BixConfig {
    #[serde(flatten, default)]
    inner: Arc<BixConfigInner>,
}

impl Deref for BixConfig {
    type Target = BixConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for BixConfig {
    fn deref_mut(&mut self) -> &mut BixConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Where the tool name and version come from, relative to the project directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectFilesConfig {
    pub generator_file: PathBuf,
    /// Top-level key of the generator file holding `{ "project": <tool> }`.
    pub generator_key: String,
    pub manifest_file: PathBuf,
}

/// `docker build` settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub dockerfile: PathBuf,
    pub context: PathBuf,
    pub no_cache: bool,
}

/// Repository prefixes per channel; the repository is `<prefix>/<tool>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelsConfig {
    pub sandbox: String,
    pub release: String,
}

impl ChannelsConfig {
    #[must_use]
    pub fn prefix(&self, channel: Channel) -> &str {
        match channel {
            Channel::Sandbox => &self.sandbox,
            Channel::Release => &self.release,
        }
    }

    /// Repository name for a tool in the given channel.
    #[must_use]
    pub fn repository(&self, channel: Channel, tool: &str) -> String {
        format!("{}/{tool}", self.prefix(channel).trim_end_matches('/'))
    }
}

/// The US and China registries, always visited in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistriesConfig {
    pub us: RegistryConfig,
    pub cn: RegistryConfig,
}

impl RegistriesConfig {
    #[must_use]
    pub const fn get(&self, key: RegistryKey) -> &RegistryConfig {
        match key {
            RegistryKey::Us => &self.us,
            RegistryKey::Cn => &self.cn,
        }
    }

    /// Registries in publishing order (US first).
    pub fn iter(&self) -> impl Iterator<Item = (RegistryKey, &RegistryConfig)> {
        [(RegistryKey::Us, &self.us), (RegistryKey::Cn, &self.cn)].into_iter()
    }
}

/// In-container documentation build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Registry to log in to before running the image.
    pub registry: RegistryKey,
    /// Host directory, relative to the project, mounted at `mount`.
    pub dir: PathBuf,
    pub mount: String,
    pub script: String,
}

/// In-container test run. Reports land in `results_dir` on the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestConfig {
    pub results_dir: PathBuf,
    pub scratch: String,
    pub source_dir: String,
    pub tests_dir: String,
    pub ignore: Vec<String>,
}

/// Local virtualenv with the helper tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenvConfig {
    pub dir: PathBuf,
    pub packages: Vec<String>,
    /// Pip configuration copied into the venv when present, relative to `$HOME`.
    pub pip_conf: PathBuf,
}

/// Release tagging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    pub remote: String,
    /// Commit identity is `<GIT_USER>@<email_domain>`.
    pub email_domain: String,
}

// --- Default ---

impl Default for ProjectFilesConfig {
    fn default() -> Self {
        Self {
            generator_file: PathBuf::from(".yo-rc.json"),
            generator_key: "generator-bix-tool".to_owned(),
            manifest_file: PathBuf::from("package.json"),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self { dockerfile: PathBuf::from("docker/Dockerfile"), context: PathBuf::from("."), no_cache: true }
    }
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        Self {
            sandbox: "sandbox/devops/devops-teamcity".to_owned(),
            release: "release/devops/devops-teamcity".to_owned(),
        }
    }
}

impl Default for RegistriesConfig {
    fn default() -> Self {
        Self { us: RegistryConfig::us(), cn: RegistryConfig::cn() }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            registry: RegistryKey::Cn,
            dir: PathBuf::from("docs"),
            mount: "/opt/project/docs".to_owned(),
            script: "/opt/project/docs/build_docs.sh".to_owned(),
        }
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("tests/results"),
            scratch: "/scratch".to_owned(),
            source_dir: "/opt/project/src".to_owned(),
            tests_dir: "/opt/project/tests".to_owned(),
            ignore: vec!["/opt/project/tests/dpl_tests".to_owned()],
        }
    }
}

impl Default for VenvConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("venv"),
            packages: vec!["dpl".to_owned()],
            pip_conf: PathBuf::from(".pip/pip.conf"),
        }
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self { remote: "origin".to_owned(), email_domain: "humanlongevity.com".to_owned() }
    }
}
