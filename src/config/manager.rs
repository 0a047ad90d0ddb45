//! Holds the validated settings for one run.

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    MergeSettings,
    loader,
};

/// Validated settings plus the workspace they belong to.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// Settings in effect
    current_settings: MergeSettings,

    /// Empty means the current directory
    workspace_root: PathBuf,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: MergeSettings::default(), workspace_root: PathBuf::new() }
    }

    /// Loads settings from `config_path`, or from the workspace root when `None`.
    ///
    /// On error the current settings are left as they were.
    ///
    /// # Errors
    /// - The config file cannot be read or parsed
    /// - Validation fails
    pub fn load_settings(
        &mut self,
        workspace_root: PathBuf,
        config_path: Option<&Path>,
    ) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        let settings = if let Some(path) = config_path {
            loader::load_from_file(path)?
        } else {
            loader::load_from_workspace(&workspace_root)?.map_or_else(MergeSettings::default, |ws| {
                tracing::debug!("Loaded workspace settings: {:?}", ws);
                ws
            })
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.workspace_root = workspace_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// Replaces the settings, e.g. after command-line overrides.
    ///
    /// # Errors
    /// Validation fails; the previous settings are kept.
    pub fn update_settings(&mut self, new_settings: MergeSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;
        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &MergeSettings {
        &self.current_settings
    }

    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// `localesDir` resolved against the workspace root
    #[must_use]
    pub fn locales_dir(&self) -> PathBuf {
        self.workspace_root.join(&self.current_settings.locales_dir)
    }

    /// `patchesDir` resolved against the workspace root
    #[must_use]
    pub fn patches_dir(&self) -> PathBuf {
        self.workspace_root.join(&self.current_settings.patches_dir)
    }
}
