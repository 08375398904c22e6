//! AWS shared credentials file upkeep for profiles fed from the environment.

use crate::context::TaskContext;
use crate::error::{TaskError, TaskErrorExt};
use bix_domain::constants::{ACCESS_KEY_SUFFIX, SECRET_KEY_SUFFIX};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// `$HOME/.aws/credentials`.
///
/// # Errors
/// [`TaskError::MissingEnv`] when `HOME` is unset.
pub(crate) fn credentials_path(ctx: &TaskContext<'_>) -> Result<PathBuf, TaskError> {
    let home = ctx.home().ok_or_else(|| TaskError::MissingEnv { name: "HOME".to_owned(), context: None })?;
    Ok(home.join(".aws").join("credentials"))
}

/// Appends `[profile]` to the credentials file unless a section with that name is
/// already there. Keys come from `<profile>_ak` and `<profile>_sk`.
///
/// # Errors
/// [`TaskError::MissingEnv`] for an absent key variable, [`TaskError::Io`] when the
/// file cannot be read or written.
pub(crate) fn ensure_profile(ctx: &TaskContext<'_>, profile: &str) -> Result<(), TaskError> {
    let path = credentials_path(ctx)?;
    let existing = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e).context(path.display().to_string()),
    };

    if has_profile(&existing, profile) {
        debug!(profile, path = %path.display(), "AWS profile already configured");
        return Ok(());
    }

    let access_key = ctx.env.require(&format!("{profile}{ACCESS_KEY_SUFFIX}"))?;
    let secret_key = ctx.env.require(&format!("{profile}{SECRET_KEY_SUFFIX}"))?;

    if ctx.dry_run {
        info!(profile, path = %path.display(), dry_run = true, "Would add AWS profile");
        return Ok(());
    }

    let mut section = profile_section(profile, access_key, secret_key);
    if !existing.is_empty() && !existing.ends_with('\n') {
        section.insert(0, '\n');
    }
    append(&path, &section).context(path.display().to_string())?;
    info!(profile, path = %path.display(), "Added AWS profile");
    Ok(())
}

fn append(path: &Path, text: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(text.as_bytes())
}

/// Whether the INI text has a `[profile]` section header.
pub(crate) fn has_profile(contents: &str, profile: &str) -> bool {
    contents
        .lines()
        .filter_map(|line| line.trim().strip_prefix('[')?.strip_suffix(']'))
        .any(|name| name.trim() == profile)
}

fn profile_section(profile: &str, access_key: &str, secret_key: &str) -> String {
    format!("[{profile}]\naws_access_key_id = {access_key}\naws_secret_access_key = {secret_key}\n")
}
