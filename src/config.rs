//! Workspace configuration: settings, validation and loading.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Locale file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use matcher::{
    LocaleFileMatcher,
    MatcherError,
};
pub use types::{
    ConcurrencyConfig,
    ConfigError,
    LocaleFilesConfig,
    MergeSettings,
    ValidationError,
    is_language_code,
};
