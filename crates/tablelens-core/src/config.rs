//! Plugin configuration (tablelens.toml)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name the plugin looks for in the project root
pub const CONFIG_FILE_NAME: &str = "tablelens.toml";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Conventional directory holding the backend functions and the schema
    #[serde(default = "default_functions_dir")]
    pub functions_dir: String,

    /// File name of the schema declaration
    #[serde(default = "default_schema_file")]
    pub schema_file: String,

    /// Project configuration file that may relocate the functions directory
    #[serde(default = "default_project_config_file")]
    pub project_config_file: String,

    /// Seed for the schema location hint
    ///
    /// Useful when the host's project root is the functions directory itself,
    /// in which case the schema's file name is simply `schema.ts`.
    #[serde(default)]
    pub initial_schema_hint: Option<String>,

    /// `tracing` filter directive used when the plugin installs logging
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Project root path (for resolving relative file names)
    #[serde(skip)]
    pub project_root: PathBuf,
}

fn default_functions_dir() -> String {
    "convex".to_string()
}

fn default_schema_file() -> String {
    "schema.ts".to_string()
}

fn default_project_config_file() -> String {
    "convex.json".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            functions_dir: default_functions_dir(),
            schema_file: default_schema_file(),
            project_config_file: default_project_config_file(),
            initial_schema_hint: None,
            log_filter: default_log_filter(),
            project_root: std::env::current_dir().unwrap_or_default(),
        }
    }
}

impl PluginConfig {
    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let mut config = Self::from_toml(&contents)?;

        // Set project root to parent of config file
        if let Some(parent) = path.parent() {
            config.project_root = parent.to_path_buf();
        }

        Ok(config)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Conventional schema path relative to the project root, e.g. `convex/schema.ts`
    pub fn conventional_schema_path(&self) -> String {
        let dir = self.functions_dir.trim_end_matches('/');
        if dir.is_empty() {
            self.schema_file.clone()
        } else {
            format!("{}/{}", dir, self.schema_file)
        }
    }

    /// Resolve a host file name against the project root
    pub fn resolve_path(&self, file_name: &str) -> PathBuf {
        let path = Path::new(file_name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config() {
        let config = PluginConfig::default();
        assert_eq!(config.functions_dir, "convex");
        assert_eq!(config.schema_file, "schema.ts");
        assert_eq!(config.conventional_schema_path(), "convex/schema.ts");
        assert!(config.initial_schema_hint.is_none());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config = PluginConfig::from_toml(
            r#"
            functions_dir = "backend/"
            initial_schema_hint = "schema.ts"
            "#,
        )
        .unwrap();

        assert_eq!(config.conventional_schema_path(), "backend/schema.ts");
        assert_eq!(config.initial_schema_hint.as_deref(), Some("schema.ts"));
        assert_eq!(config.project_config_file, "convex.json");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = PluginConfig::from_toml("functions_dir = [").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn file_roundtrip_sets_project_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = PluginConfig::default();
        config.schema_file = "tables.ts".to_string();
        config.save_to_file(&path).unwrap();

        let loaded = PluginConfig::from_file(&path).unwrap();
        assert_eq!(loaded.schema_file, "tables.ts");
        assert_eq!(loaded.project_root, dir.path());
    }

    #[test]
    fn resolve_relative_path() {
        let mut config = PluginConfig::default();
        config.project_root = PathBuf::from("/work/app");

        assert_eq!(
            config.resolve_path("convex/schema.ts"),
            PathBuf::from("/work/app/convex/schema.ts")
        );
        assert_eq!(config.resolve_path("/abs/schema.ts"), PathBuf::from("/abs/schema.ts"));
    }
}
