use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the tool image being built: its name and the version from the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Tool name from the generator configuration (also the local image name).
    pub tool: String,
    /// Semantic version from the package manifest (also the image and git tag).
    pub version: String,
}

impl ProjectMetadata {
    pub fn new(tool: impl Into<String>, version: impl Into<String>) -> Self {
        Self { tool: tool.into(), version: version.into() }
    }
}

impl fmt::Display for ProjectMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.tool, self.version)
    }
}
