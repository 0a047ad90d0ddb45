//! What a merge changed.

use std::fmt;

/// Key paths touched by a merge, joined with the configured key separator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Keys that did not exist in the target. A whole inserted section counts once.
    pub added: Vec<String>,
    /// Leaves whose value was replaced by a different one.
    pub updated: Vec<String>,
    /// Keys present in the patch but left alone because the target already had them.
    pub kept: Vec<String>,
}

impl MergeReport {
    /// True if the merge modified the target.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.updated.is_empty()
    }
}

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} added, {} updated", self.added.len(), self.updated.len())?;
        if !self.kept.is_empty() {
            write!(f, ", {} kept", self.kept.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_empty_report_has_no_changes() {
        let report = MergeReport::default();

        assert!(!report.has_changes());
        assert_eq!(report.to_string(), "0 added, 0 updated");
    }

    #[rstest]
    fn test_kept_only_is_not_a_change() {
        let report = MergeReport { kept: vec!["navbar.home".to_string()], ..MergeReport::default() };

        assert!(!report.has_changes());
        assert_eq!(report.to_string(), "0 added, 0 updated, 1 kept");
    }
}
