//! Reads the tool name and version of the project being released.

use bix_domain::config::ProjectFilesConfig;
use bix_domain::project::ProjectMetadata;
use serde_json::Value;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::info;

#[bix_derive::bix_error]
pub enum ProjectError {
    #[error("Failed to read project file{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Malformed project file{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Missing `{field}` in {file}{}", format_context(.context))]
    MissingField { field: String, file: String, context: Option<Cow<'static, str>> },
}

/// Resolves [`ProjectMetadata`] from the generator file (`["<generator_key>"]["project"]`)
/// and the manifest (`version`), both relative to `dir`.
///
/// # Errors
/// Returns [`ProjectError::Io`] or [`ProjectError::Json`] for unreadable files and
/// [`ProjectError::MissingField`] when a value is absent, not a string, or empty.
pub fn load_project(dir: &Path, files: &ProjectFilesConfig) -> Result<ProjectMetadata, ProjectError> {
    let generator = read_json(&dir.join(&files.generator_file))?;
    let tool = string_at(&generator, &[files.generator_key.as_str(), "project"], &files.generator_file)?;

    let manifest = read_json(&dir.join(&files.manifest_file))?;
    let version = string_at(&manifest, &["version"], &files.manifest_file)?;

    let project = ProjectMetadata::new(tool, version);
    info!(tool = %project.tool, version = %project.version, "Resolved project");
    Ok(project)
}

fn read_json(path: &Path) -> Result<Value, ProjectError> {
    let raw = fs::read_to_string(path).context(path.display().to_string())?;
    serde_json::from_str(&raw).context(path.display().to_string())
}

fn string_at(value: &Value, path: &[&str], file: &Path) -> Result<String, ProjectError> {
    let found = path
        .iter()
        .try_fold(value, |node, key| node.get(*key))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty());

    found.map(str::to_owned).ok_or_else(|| ProjectError::MissingField {
        field: path.join("."),
        file: file.display().to_string(),
        context: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_project(dir: &Path, yo_rc: &str, package: &str) {
        fs::write(dir.join(".yo-rc.json"), yo_rc).unwrap();
        fs::write(dir.join("package.json"), package).unwrap();
    }

    #[test]
    fn reads_tool_and_version() {
        let dir = tempdir().unwrap();
        write_project(
            dir.path(),
            r#"{ "generator-bix-tool": { "project": "hla-typer", "author": "ops" } }"#,
            r#"{ "name": "hla-typer", "version": "1.4.2" }"#,
        );

        let project = load_project(dir.path(), &ProjectFilesConfig::default()).unwrap();
        assert_eq!(project, ProjectMetadata::new("hla-typer", "1.4.2"));
    }

    #[test]
    fn missing_generator_entry_is_reported_with_its_path() {
        let dir = tempdir().unwrap();
        write_project(dir.path(), r#"{ "generator-other": {} }"#, r#"{ "version": "1.0.0" }"#);

        let err = load_project(dir.path(), &ProjectFilesConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "Missing `generator-bix-tool.project` in .yo-rc.json");
    }

    #[test]
    fn empty_version_is_missing() {
        let dir = tempdir().unwrap();
        write_project(
            dir.path(),
            r#"{ "generator-bix-tool": { "project": "hla-typer" } }"#,
            r#"{ "version": "  " }"#,
        );

        let err = load_project(dir.path(), &ProjectFilesConfig::default()).unwrap_err();
        assert!(matches!(err, ProjectError::MissingField { ref field, .. } if field == "version"));
    }

    #[test]
    fn unreadable_and_malformed_files_keep_the_path_as_context() {
        let dir = tempdir().unwrap();
        let err = load_project(dir.path(), &ProjectFilesConfig::default()).unwrap_err();
        assert!(matches!(err, ProjectError::Io { .. }));
        assert!(err.to_string().contains(".yo-rc.json"));

        fs::write(dir.path().join(".yo-rc.json"), "{ not json").unwrap();
        let err = load_project(dir.path(), &ProjectFilesConfig::default()).unwrap_err();
        assert!(matches!(err, ProjectError::Json { .. }));
    }
}
