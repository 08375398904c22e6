use bix_domain::config::BixConfig;
use config::{Config, Environment, File, Map};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File looked up in the project directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "bix.toml";

/// Prefix of environment overrides, e.g. `BIX__REGISTRIES__CN__REGION`.
pub const ENV_PREFIX: &str = "BIX";

/// Keys whose environment values are comma-separated lists.
const LIST_KEYS: &[&str] = &["venv.packages", "test.ignore", "registries.cn.policy.actions"];

#[bix_derive::bix_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads the tool configuration in three layers:
///
/// 1. **Defaults**: [`BixConfig::default`], the stock US/China release setup.
/// 2. **File**: `path` when given (must exist), otherwise `<project_dir>/bix.toml` if present.
/// 3. **Environment**: variables prefixed with `BIX__`, nested with `__`
///    (`BIX__GIT__EMAIL_DOMAIN` maps to `git.email_domain`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing, a file is malformed, or
/// the merged values do not match [`BixConfig`].
pub fn load_config(path: Option<&Path>, project_dir: &Path) -> Result<BixConfig, ConfigError> {
    load_config_with_env(path, project_dir, None)
}

/// Same as [`load_config`], reading overrides from `env` instead of the process
/// environment when given.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with_env(
    path: Option<&Path>,
    project_dir: &Path,
    env: Option<Map<String, String>>,
) -> Result<BixConfig, ConfigError> {
    let defaults =
        Config::try_from(&BixConfig::default()).context("Failed to seed default config")?;

    let (file, required) = path.map_or_else(
        || (project_dir.join(DEFAULT_CONFIG_FILE), false),
        |p| (PathBuf::from(p), true),
    );

    if required || file.exists() {
        info!("Loading config from {}", file.display());
    } else {
        debug!("No {} in {}, using defaults", DEFAULT_CONFIG_FILE, project_dir.display());
    }

    let mut overrides = Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .convert_case(config::Case::Snake)
        .try_parsing(true)
        .list_separator(",")
        .source(env);
    for key in LIST_KEYS {
        overrides = overrides.with_list_parse_key(key);
    }

    let config = Config::builder()
        .add_source(defaults)
        .add_source(File::from(file.as_path()).required(required))
        .add_source(overrides)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<BixConfig>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bix_domain::registry::RegistryKey;
    use std::fs;
    use tempfile::tempdir;

    fn no_env() -> Option<Map<String, String>> {
        Some(Map::new())
    }

    #[test]
    fn missing_project_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let cfg = load_config_with_env(None, dir.path(), no_env()).unwrap();
        assert_eq!(cfg, BixConfig::default());
    }

    #[test]
    fn project_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"
[docs]
registry = "us"

[registries.cn]
push_latest = false

[venv]
packages = ["dpl", "awscli"]
"#,
        )
        .unwrap();

        let cfg = load_config_with_env(None, dir.path(), no_env()).unwrap();
        assert_eq!(cfg.docs.registry, RegistryKey::Us);
        assert!(!cfg.registries.cn.push_latest);
        assert_eq!(cfg.registries.cn.region, "cn-northwest-1");
        assert_eq!(cfg.venv.packages, vec!["dpl".to_owned(), "awscli".to_owned()]);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load_config_with_env(Some(&missing), dir.path(), no_env()).unwrap_err();
        assert!(matches!(err, ConfigError::Config { .. }));
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "[git]\nemail_domain = \"file.example\"\n")
            .unwrap();

        let env = Map::from([
            ("BIX__GIT__EMAIL_DOMAIN".to_owned(), "env.example".to_owned()),
            ("BIX__REGISTRIES__US__REGION".to_owned(), "us-east-1".to_owned()),
            ("UNRELATED".to_owned(), "ignored".to_owned()),
        ]);
        let cfg = load_config_with_env(None, dir.path(), Some(env)).unwrap();

        assert_eq!(cfg.git.email_domain, "env.example");
        assert_eq!(cfg.registries.us.region, "us-east-1");
        assert_eq!(cfg.registries.us.host(), "205134639408.dkr.ecr.us-east-1.amazonaws.com");
    }
}
