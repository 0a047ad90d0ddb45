//! Reading `.locale-merge.json`.

use std::path::Path;

use super::{
    ConfigError,
    MergeSettings,
};

/// Config file looked up in the workspace root
pub const CONFIG_FILE_NAME: &str = ".locale-merge.json";

/// Loads [`CONFIG_FILE_NAME`] from the workspace root.
///
/// `Ok(None)` means there is no config file and defaults apply.
///
/// # Errors
/// - The file cannot be read
/// - The file is not valid settings JSON
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<MergeSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    load_from_file(&config_path).map(Some)
}

/// Loads settings from an explicit path. A missing file is an error here.
///
/// # Errors
/// - The file cannot be read
/// - The file is not valid settings JSON
pub(super) fn load_from_file(config_path: &Path) -> Result<MergeSettings, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    let settings: MergeSettings = serde_json::from_str(&content)?;

    Ok(settings)
}
