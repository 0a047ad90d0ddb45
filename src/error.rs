//! Error types shared by the patch resolver and the runner.

use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use crate::config::{
    ConfigError,
    MatcherError,
};
use crate::document::DocumentError;

/// Failure while processing a single locale. Other locales are unaffected.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },

    #[error("Failed to serialize '{}': {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProcessError {
    /// File the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::Serialize { path, .. }
            | Self::Write { path, .. } => path.as_path(),
        }
    }
}

/// Failure that stops a run or key audit before any locale is processed.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    #[error("Failed to list locale files in '{}': {source}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No locale files found in '{}'", .0.display())]
    NoLocales(PathBuf),

    #[error("Reference locale '{}' not found", .0.display())]
    MissingReference(PathBuf),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("Locale task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
