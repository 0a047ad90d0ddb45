//! Recursive overwrite-or-insert merge.

use indexmap::map::Entry;
use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

use super::MergeReport;
use crate::document::{
    Document,
    DocumentError,
    Node,
};

/// What happens when a patch key already exists in the target with a non-mergeable value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// The patch value replaces the existing one, including on type divergence.
    #[default]
    Overwrite,
    /// Existing values are never replaced; only absent keys are inserted.
    InsertMissing,
}

/// Merges patches into locale documents.
///
/// Where both sides hold a section under the same key the merge recurses;
/// everything else is decided by the [`MergePolicy`]. Keys of the target that
/// the patch does not mention are never touched.
#[derive(Debug, Clone)]
pub struct LocaleMerger {
    /// Conflict resolution
    policy: MergePolicy,
    /// Joins key path segments in reports
    key_separator: String,
}

impl Default for LocaleMerger {
    fn default() -> Self {
        Self::new(MergePolicy::default(), ".")
    }
}

impl LocaleMerger {
    #[must_use]
    pub fn new(policy: MergePolicy, key_separator: impl Into<String>) -> Self {
        Self { policy, key_separator: key_separator.into() }
    }

    /// Merge `patch` into `target` in place.
    pub fn merge_into(&self, target: &mut Document, patch: Document) -> MergeReport {
        let mut report = MergeReport::default();
        self.merge_level(target, patch, None, &mut report);
        report
    }

    /// Merge `patch` into `target` and hand the result back to the caller.
    #[must_use]
    pub fn merge(&self, mut target: Document, patch: Document) -> (Document, MergeReport) {
        let report = self.merge_into(&mut target, patch);
        (target, report)
    }

    /// One level of the merge. `prefix` is the key path of `target` inside the root document.
    fn merge_level(
        &self,
        target: &mut Document,
        patch: Document,
        prefix: Option<&str>,
        report: &mut MergeReport,
    ) {
        for (key, incoming) in patch {
            let path =
                prefix.map_or_else(|| key.clone(), |p| format!("{p}{}{key}", self.key_separator));

            match target.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(incoming);
                    report.added.push(path);
                }
                Entry::Occupied(mut slot) => match (slot.get_mut(), incoming) {
                    (Node::Map(existing), Node::Map(nested)) => {
                        self.merge_level(existing, nested, Some(&path), report);
                    }
                    (existing, incoming) => {
                        if *existing == incoming {
                            continue;
                        }
                        match self.policy {
                            MergePolicy::Overwrite => {
                                *existing = incoming;
                                report.updated.push(path);
                            }
                            MergePolicy::InsertMissing => report.kept.push(path),
                        }
                    }
                },
            }
        }
    }
}

/// Deep-merge `patch` into `target` with the default overwrite policy.
#[must_use]
pub fn merge(target: Document, patch: Document) -> Document {
    LocaleMerger::default().merge(target, patch).0
}

/// [`merge`] for untyped JSON values.
///
/// # Errors
/// `DocumentError::MalformedInput` if either value is not a JSON object.
pub fn merge_values(target: Value, patch: Value) -> Result<Value, DocumentError> {
    let target = Document::try_from(target)?;
    let patch = Document::try_from(patch)?;
    Ok(merge(target, patch).into())
}
