//! Per-locale results and the run summary.

use std::fmt;
use std::path::PathBuf;

use crate::error::ProcessError;
use crate::merge::MergeReport;

/// What happened to one locale file.
#[derive(Debug)]
pub enum LocaleOutcome {
    /// The file was rewritten.
    Updated(MergeReport),
    /// The file would have been rewritten; `--dry-run` kept it as is.
    DryRun(MergeReport),
    /// The patch was already fully applied.
    Unchanged,
    /// The locale file does not exist.
    Missing,
    /// Neither a custom nor a fallback patch applies.
    NoPatch,
    Failed(ProcessError),
}

impl LocaleOutcome {
    /// Short label used in logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Updated(_) => "updated",
            Self::DryRun(_) => "dry-run",
            Self::Unchanged => "unchanged",
            Self::Missing => "missing",
            Self::NoPatch => "no-patch",
            Self::Failed(_) => "failed",
        }
    }

    #[must_use]
    pub const fn report(&self) -> Option<&MergeReport> {
        match self {
            Self::Updated(report) | Self::DryRun(report) => Some(report),
            Self::Unchanged | Self::Missing | Self::NoPatch | Self::Failed(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct LocaleResult {
    pub language: String,
    pub path: PathBuf,
    pub outcome: LocaleOutcome,
}

/// Results of a run, in the order the languages were requested.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub results: Vec<LocaleResult>,
}

impl RunSummary {
    /// Counts results whose outcome has the given label.
    fn count(&self, label: &str) -> usize {
        self.results.iter().filter(|r| r.outcome.label() == label).count()
    }

    #[must_use]
    pub fn updated(&self) -> usize {
        self.count("updated")
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count("failed")
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    /// Finds the result for a language.
    #[must_use]
    pub fn get(&self, language: &str) -> Option<&LocaleResult> {
        self.results.iter().find(|r| r.language == language)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = ["updated", "dry-run", "unchanged", "missing", "no-patch", "failed"];
        let parts: Vec<String> = labels
            .iter()
            .filter_map(|label| {
                let n = self.count(label);
                (n > 0).then(|| format!("{n} {label}"))
            })
            .collect();

        if parts.is_empty() { write!(f, "nothing to do") } else { write!(f, "{}", parts.join(", ")) }
    }
}
