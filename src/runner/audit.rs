//! Key audit: which keys of the reference locale each locale lacks.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;

use crate::document::Node;
use crate::error::ProcessError;

/// Flattened key differences between one locale and the reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyAudit {
    /// Reference keys absent from the locale, in reference order.
    pub missing: Vec<String>,
    /// Locale keys absent from the reference, in locale order.
    pub extra: Vec<String>,
}

impl KeyAudit {
    /// Compares two flattened documents by key only.
    #[must_use]
    pub fn compare(reference: &IndexMap<String, &Node>, locale: &IndexMap<String, &Node>) -> Self {
        Self {
            missing: reference.keys().filter(|key| !locale.contains_key(*key)).cloned().collect(),
            extra: locale.keys().filter(|key| !reference.contains_key(*key)).cloned().collect(),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

#[derive(Debug)]
pub enum AuditOutcome {
    Checked(KeyAudit),
    /// The locale file does not exist.
    Missing,
    Failed(ProcessError),
}

#[derive(Debug)]
pub struct LocaleAudit {
    pub language: String,
    pub path: PathBuf,
    pub outcome: AuditOutcome,
}

impl LocaleAudit {
    /// Missing keys, or none if the locale could not be checked.
    fn missing(&self) -> &[String] {
        match &self.outcome {
            AuditOutcome::Checked(audit) => &audit.missing,
            AuditOutcome::Missing | AuditOutcome::Failed(_) => &[],
        }
    }
}

/// Results of a key audit, in language order.
#[derive(Debug)]
pub struct AuditSummary {
    /// Language every locale is compared against
    pub reference: String,
    /// Leaf keys in the reference locale
    pub reference_keys: usize,
    pub audits: Vec<LocaleAudit>,
}

impl AuditSummary {
    /// Locales lacking at least one reference key.
    #[must_use]
    pub fn incomplete(&self) -> usize {
        self.audits.iter().filter(|a| !a.missing().is_empty()).count()
    }

    #[must_use]
    pub fn missing_keys(&self) -> usize {
        self.audits.iter().map(|a| a.missing().len()).sum()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.audits.iter().filter(|a| matches!(a.outcome, AuditOutcome::Failed(_))).count()
    }

    /// True if any locale lacks keys or could not be read.
    #[must_use]
    pub fn has_problems(&self) -> bool {
        self.incomplete() > 0 || self.failed() > 0
    }

    #[must_use]
    pub fn get(&self, language: &str) -> Option<&LocaleAudit> {
        self.audits.iter().find(|a| a.language == language)
    }
}

impl fmt::Display for AuditSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} locales checked against '{}' ({} keys): {} incomplete, {} missing keys",
            self.audits.len(),
            self.reference,
            self.reference_keys,
            self.incomplete(),
            self.missing_keys()
        )?;
        let failed = self.failed();
        if failed > 0 {
            write!(f, ", {failed} failed")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::test_utils::doc;

    #[googletest::test]
    fn test_compare_lists_missing_and_extra_in_order() {
        let reference = doc(json!({
            "navbar": { "home": "Home", "bugReports": "Reported Bugs" },
            "help": { "title": "Help" },
            "footer": "Footer"
        }));
        let locale = doc(json!({
            "navbar": { "home": "Startseite", "legacy": "Alt" },
            "footer": "Fußzeile"
        }));

        let audit = KeyAudit::compare(&reference.flatten("."), &locale.flatten("."));

        assert_eq!(audit.missing, vec!["navbar.bugReports", "help.title"]);
        assert_eq!(audit.extra, vec!["navbar.legacy"]);
        expect_that!(audit.is_complete(), eq(false));
    }

    #[rstest]
    fn test_section_replaced_by_text_counts_as_missing() {
        let reference = doc(json!({ "help": { "title": "Help" } }));
        let locale = doc(json!({ "help": "Hilfe" }));

        let audit = KeyAudit::compare(&reference.flatten("."), &locale.flatten("."));

        assert_eq!(audit.missing, vec!["help.title"]);
        assert_eq!(audit.extra, vec!["help"]);
    }

    #[rstest]
    fn test_summary_display() {
        let summary = AuditSummary {
            reference: "en".to_string(),
            reference_keys: 3,
            audits: vec![
                LocaleAudit {
                    language: "de".to_string(),
                    path: PathBuf::from("locales/de.json"),
                    outcome: AuditOutcome::Checked(KeyAudit {
                        missing: vec!["a".to_string(), "b".to_string()],
                        extra: vec![],
                    }),
                },
                LocaleAudit {
                    language: "fr".to_string(),
                    path: PathBuf::from("locales/fr.json"),
                    outcome: AuditOutcome::Checked(KeyAudit::default()),
                },
                LocaleAudit {
                    language: "it".to_string(),
                    path: PathBuf::from("locales/it.json"),
                    outcome: AuditOutcome::Missing,
                },
            ],
        };

        assert!(summary.has_problems());
        assert_eq!(summary.incomplete(), 1);
        assert_eq!(
            summary.to_string(),
            "3 locales checked against 'en' (3 keys): 1 incomplete, 2 missing keys"
        );
    }
}
