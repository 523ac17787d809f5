//! Configuration discovery

use anyhow::{Context, Result};
use std::path::Path;
use tablelens_core::config::CONFIG_FILE_NAME;
use tablelens_core::PluginConfig;

/// Load `tablelens.toml` from the project root
///
/// A missing file means defaults rooted at `project_root`; an unreadable or
/// malformed one is an error.
pub fn load_config(project_root: &Path) -> Result<PluginConfig> {
    let path = project_root.join(CONFIG_FILE_NAME);

    if !path.exists() {
        tracing::debug!(root = %project_root.display(), "no config file, using defaults");
        return Ok(PluginConfig {
            project_root: project_root.to_path_buf(),
            ..PluginConfig::default()
        });
    }

    let config = PluginConfig::from_file(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    tracing::info!(path = %path.display(), "loaded config");
    Ok(config)
}
