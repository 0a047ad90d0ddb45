//! Applies patches to every configured locale file.
//!
//! Each locale goes through read → parse → resolve patch → merge → serialize →
//! write on its own blocking task. Locales share nothing mutable, so a failure
//! in one never affects another.

mod audit;
mod outcome;

use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

pub use audit::{
    AuditOutcome,
    AuditSummary,
    KeyAudit,
    LocaleAudit,
};
use futures::StreamExt;
pub use outcome::{
    LocaleOutcome,
    LocaleResult,
    RunSummary,
};

use crate::config::{
    ConfigManager,
    LocaleFileMatcher,
    MergeSettings,
};
use crate::document::{
    Document,
    OutputFormat,
    parse_document,
    to_json_string,
};
use crate::error::{
    ProcessError,
    RunError,
};
use crate::merge::LocaleMerger;
use crate::patch::PatchResolver;
use crate::storage::LocaleStore;

/// Drives a whole run over a [`LocaleStore`].
#[derive(Debug)]
pub struct LocaleRunner<S> {
    /// File access
    store: Arc<S>,
    /// Validated settings
    settings: MergeSettings,
    /// `<workspace>/<localesDir>`
    locales_dir: PathBuf,
    /// `<workspace>/<patchesDir>`
    patches_dir: PathBuf,
    /// Skip writes
    dry_run: bool,
}

impl<S: LocaleStore + 'static> LocaleRunner<S> {
    #[must_use]
    pub fn new(store: Arc<S>, config: &ConfigManager) -> Self {
        Self {
            store,
            settings: config.get_settings().clone(),
            locales_dir: config.locales_dir(),
            patches_dir: config.patches_dir(),
            dry_run: false,
        }
    }

    /// Report what would change without writing anything.
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Languages this run will process, paired with their locale file.
    ///
    /// Explicit `languages` are taken as given. Otherwise the locales directory
    /// is listed, minus the fallback language and `excludeLanguages`.
    ///
    /// # Errors
    /// - Invalid file pattern
    /// - The locales directory cannot be listed
    /// - Discovery found nothing
    fn targets(&self, matcher: &LocaleFileMatcher) -> Result<Vec<(String, PathBuf)>, RunError> {
        if let Some(languages) = &self.settings.languages {
            return Ok(languages
                .iter()
                .map(|lang| (lang.clone(), matcher.path_for(&self.locales_dir, lang)))
                .collect());
        }

        let files = self.store.list_files(&self.locales_dir).map_err(|source| {
            RunError::Discovery { path: self.locales_dir.clone(), source }
        })?;

        let mut targets: Vec<(String, PathBuf)> = files
            .into_iter()
            .filter_map(|path| matcher.language_of(&path).map(|lang| (lang, path)))
            .filter(|(lang, _)| {
                *lang != self.settings.fallback_language
                    && !self.settings.exclude_languages.contains(lang)
            })
            .collect();
        targets.sort();
        targets.dedup_by(|a, b| a.0 == b.0);

        if targets.is_empty() {
            return Err(RunError::NoLocales(self.locales_dir.clone()));
        }

        tracing::debug!(count = targets.len(), "Discovered locale files");
        Ok(targets)
    }

    /// Processes every language, at most `concurrency.numThreads` at a time.
    ///
    /// Per-locale failures are recorded in the summary; only problems that
    /// prevent the run from starting are returned as errors.
    ///
    /// # Errors
    /// See [`RunError`].
    pub async fn run(&self) -> Result<RunSummary, RunError> {
        let matcher = LocaleFileMatcher::new(&self.settings)?;
        let targets = self.targets(&matcher)?;
        let resolver = PatchResolver::load(
            self.store.as_ref(),
            &self.patches_dir,
            &matcher.path_for(&self.locales_dir, &self.settings.fallback_language),
            &self.settings.fallback_language,
            &self.settings.fallback_sections,
        )?;

        let task = Arc::new(LocaleTask {
            store: Arc::clone(&self.store),
            resolver,
            merger: LocaleMerger::new(self.settings.policy, self.settings.key_separator.clone()),
            format: self.settings.output,
            dry_run: self.dry_run,
        });

        let threads = self.settings.concurrency.effective_threads();
        tracing::info!(
            locales = targets.len(),
            threads,
            policy = ?self.settings.policy,
            dry_run = self.dry_run,
            "Merging translations"
        );

        let mut indexed = futures::stream::iter(targets.into_iter().enumerate())
            .map(|(index, (language, path))| {
                let task = Arc::clone(&task);
                tokio::task::spawn_blocking(move || (index, task.process(language, path)))
            })
            .buffer_unordered(threads)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        indexed.sort_by_key(|(index, _)| *index);
        let summary = RunSummary { results: indexed.into_iter().map(|(_, result)| result).collect() };

        tracing::info!(%summary, "Translation update complete");
        Ok(summary)
    }

    /// Compares every target locale's keys with the fallback locale's keys.
    ///
    /// Nothing is written. Unreadable or broken locales are recorded as
    /// failures in the summary.
    ///
    /// # Errors
    /// The reference locale is missing or broken, or targets cannot be discovered.
    pub fn check(&self) -> Result<AuditSummary, RunError> {
        let matcher = LocaleFileMatcher::new(&self.settings)?;
        let targets = self.targets(&matcher)?;
        let separator = self.settings.key_separator.as_str();

        let reference_path = matcher.path_for(&self.locales_dir, &self.settings.fallback_language);
        let reference = read_locale(self.store.as_ref(), &reference_path)?
            .ok_or_else(|| RunError::MissingReference(reference_path.clone()))?;
        let reference_keys = reference.flatten(separator);

        tracing::info!(
            reference = %reference_path.display(),
            keys = reference_keys.len(),
            locales = targets.len(),
            "Checking translation keys"
        );

        let audits = targets
            .into_iter()
            .map(|(language, path)| {
                let outcome = match read_locale(self.store.as_ref(), &path) {
                    Ok(Some(document)) => {
                        let audit = KeyAudit::compare(&reference_keys, &document.flatten(separator));
                        for key in &audit.missing {
                            tracing::warn!(language = %language, key = %key, "Missing key");
                        }
                        for key in &audit.extra {
                            tracing::debug!(language = %language, key = %key, "Key not in reference");
                        }
                        AuditOutcome::Checked(audit)
                    }
                    Ok(None) => {
                        tracing::warn!(path = %path.display(), "File not found");
                        AuditOutcome::Missing
                    }
                    Err(e) => {
                        tracing::error!(language = %language, error = %e, "Error checking locale file");
                        AuditOutcome::Failed(e)
                    }
                };
                LocaleAudit { language, path, outcome }
            })
            .collect();

        let summary = AuditSummary {
            reference: self.settings.fallback_language.clone(),
            reference_keys: reference_keys.len(),
            audits,
        };
        tracing::info!(%summary, "Key check complete");
        Ok(summary)
    }
}

/// Reads and parses one locale file. `Ok(None)` if it does not exist.
fn read_locale<S: LocaleStore>(store: &S, path: &Path) -> Result<Option<Document>, ProcessError> {
    let Some(text) = store
        .read(path)
        .map_err(|source| ProcessError::Read { path: path.to_path_buf(), source })?
    else {
        return Ok(None);
    };
    parse_document(&text)
        .map(Some)
        .map_err(|source| ProcessError::Parse { path: path.to_path_buf(), source })
}

/// Everything one locale needs, shared read-only between blocking tasks.
struct LocaleTask<S> {
    /// File access
    store: Arc<S>,
    /// Patch lookup with preloaded fallback material
    resolver: PatchResolver,
    /// Configured merge
    merger: LocaleMerger,
    /// Output formatting
    format: OutputFormat,
    /// Skip writes
    dry_run: bool,
}

impl<S: LocaleStore> LocaleTask<S> {
    /// Runs the full cycle for one language, turning errors into a `Failed` outcome.
    fn process(&self, language: String, path: PathBuf) -> LocaleResult {
        let outcome = match self.apply(&language, &path) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(language = %language, error = %e, "Error processing locale file");
                LocaleOutcome::Failed(e)
            }
        };

        LocaleResult { language, path, outcome }
    }

    /// Read → parse → resolve → merge → serialize → write.
    fn apply(&self, language: &str, path: &Path) -> Result<LocaleOutcome, ProcessError> {
        let store = self.store.as_ref();

        let Some(text) = store
            .read(path)
            .map_err(|source| ProcessError::Read { path: path.to_path_buf(), source })?
        else {
            tracing::warn!(path = %path.display(), "File not found");
            return Ok(LocaleOutcome::Missing);
        };

        let mut document = parse_document(&text)
            .map_err(|source| ProcessError::Parse { path: path.to_path_buf(), source })?;

        let Some(resolved) = self.resolver.resolve(store, language)? else {
            tracing::warn!(language, "No patch for locale");
            return Ok(LocaleOutcome::NoPatch);
        };

        tracing::debug!(language, origins = ?resolved.origins, "Resolved patch");
        let fallback = resolved.is_fallback();
        let report = self.merger.merge_into(&mut document, resolved.patch);
        for key in &report.kept {
            tracing::debug!(language, key = %key, "Kept existing value");
        }
        if !report.has_changes() {
            tracing::debug!(language, "Already up to date");
            return Ok(LocaleOutcome::Unchanged);
        }

        let output = to_json_string(&document, &self.format)
            .map_err(|source| ProcessError::Serialize { path: path.to_path_buf(), source })?;
        if output == text {
            return Ok(LocaleOutcome::Unchanged);
        }

        if self.dry_run {
            tracing::info!(language, %report, fallback, "Would update {}", path.display());
            return Ok(LocaleOutcome::DryRun(report));
        }

        store
            .write(path, &output)
            .map_err(|source| ProcessError::Write { path: path.to_path_buf(), source })?;

        for key in report.added.iter().chain(&report.updated) {
            tracing::debug!(language, key = %key, "Applied");
        }
        tracing::info!(language, %report, fallback, "Updated {}", path.display());
        Ok(LocaleOutcome::Updated(report))
    }
}
