//! Project configuration file (convex.json)
//!
//! Only the `functions` member matters here: it relocates the directory that
//! holds the schema declaration.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// convex.json structure (subset of fields we care about)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Custom functions directory, relative to the project root
    #[serde(default)]
    pub functions: Option<String>,
}

impl ProjectConfig {
    /// Load project config from file
    pub fn from_file(path: &Path) -> Result<Self, ProjectConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ProjectConfigError::IoError(path.display().to_string(), e.to_string()))?;

        Self::from_str(&contents)
    }

    /// Parse project config from JSON string
    ///
    /// Anything but a JSON object, or a non-string `functions`, is rejected.
    pub fn from_str(json: &str) -> Result<Self, ProjectConfigError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| ProjectConfigError::ParseError(e.to_string()))?;

        // A derived struct visitor would also accept `["dir"]` positionally
        if !value.is_object() {
            return Err(ProjectConfigError::ParseError(
                "expected a JSON object".to_string(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| ProjectConfigError::ParseError(e.to_string()))
    }

    /// Normalized `<functions>/<schema_file>` path, if a functions directory is set
    pub fn schema_path(&self, schema_file: &str) -> Option<PathBuf> {
        let functions = self.functions.as_deref()?;
        Some(normalize(&Path::new(functions).join(schema_file)))
    }
}

/// Lexically normalize a path: drop `.` components and fold `..` into its parent
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Project config errors
#[derive(Debug, thiserror::Error)]
pub enum ProjectConfigError {
    #[error("Failed to read {0}: {1}")]
    IoError(String, String),

    #[error("Invalid project config: {0}")]
    ParseError(String),
}
