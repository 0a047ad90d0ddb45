//! Command-line surface.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{
    ArgAction,
    Parser,
};

use crate::config::{
    ConfigError,
    ConfigManager,
    MergeSettings,
};
use crate::error::RunError;
use crate::merge::MergePolicy;
use crate::runner::{
    AuditSummary,
    LocaleRunner,
    RunSummary,
};
use crate::storage::FsStore;

#[derive(Parser, Debug)]
#[command(
    name = "locale-merge",
    about = "Deep-merge translation patches into per-locale JSON files",
    version
)]
pub struct Cli {
    /// Workspace root; relative directories in the config resolve against it
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub workspace: PathBuf,

    /// Config file to use instead of `<workspace>/.locale-merge.json`
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override `localesDir`
    #[arg(long, value_name = "DIR")]
    pub locales_dir: Option<String>,

    /// Override `patchesDir`
    #[arg(long, value_name = "DIR")]
    pub patches_dir: Option<String>,

    /// Only update these locales (repeatable)
    #[arg(short = 'l', long = "language", value_name = "LANG")]
    pub languages: Vec<String>,

    /// Override `policy`
    #[arg(long, value_enum)]
    pub policy: Option<MergePolicy>,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// List keys of the fallback locale missing from each locale; nothing is written
    #[arg(long, conflicts_with = "dry_run")]
    pub check: bool,

    /// Locale files processed at the same time
    #[arg(short = 'j', long, value_name = "N")]
    pub jobs: Option<usize>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Applies command-line overrides on top of file settings.
    pub fn apply_overrides(&self, settings: &mut MergeSettings) {
        if let Some(dir) = &self.locales_dir {
            settings.locales_dir.clone_from(dir);
        }
        if let Some(dir) = &self.patches_dir {
            settings.patches_dir.clone_from(dir);
        }
        if !self.languages.is_empty() {
            settings.languages = Some(self.languages.clone());
        }
        if let Some(policy) = self.policy {
            settings.policy = policy;
        }
        if let Some(jobs) = self.jobs {
            settings.concurrency.num_threads = Some(jobs);
        }
    }

    /// Default log filter when `RUST_LOG` is not set.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Loads the workspace config and applies the overrides.
    ///
    /// # Errors
    /// The config file cannot be read or parsed, or the merged settings are invalid.
    pub fn load_config(&self) -> Result<ConfigManager, ConfigError> {
        let mut manager = ConfigManager::new();
        manager.load_settings(self.workspace.clone(), self.config.as_deref())?;

        let mut settings = manager.get_settings().clone();
        self.apply_overrides(&mut settings);
        manager.update_settings(settings)?;

        Ok(manager)
    }
}

/// Runs against the filesystem.
///
/// # Errors
/// See [`RunError`]. Per-locale failures are in the summary instead.
pub async fn run(cli: &Cli) -> Result<RunSummary, RunError> {
    let config = cli.load_config()?;
    LocaleRunner::new(Arc::new(FsStore::new()), &config).dry_run(cli.dry_run).run().await
}

/// Audits locale keys on the filesystem.
///
/// # Errors
/// See [`RunError`]. Incomplete or broken locales are in the summary instead.
pub fn check(cli: &Cli) -> Result<AuditSummary, RunError> {
    let config = cli.load_config()?;
    LocaleRunner::new(Arc::new(FsStore::new()), &config).check()
}
