//! File pattern matcher for locale files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobMatcher,
};

use super::MergeSettings;
use super::types::is_language_code;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid locale file pattern '{pattern}': {source}")]
    InvalidLocalePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Decides which files in the locales directory are locale files and which
/// language each one holds.
#[derive(Debug, Clone)]
pub struct LocaleFileMatcher {
    file_matcher: GlobMatcher,
}

impl LocaleFileMatcher {
    /// Creates a new matcher from settings.
    pub fn new(settings: &MergeSettings) -> Result<Self, MatcherError> {
        let pattern = &settings.locale_files.file_pattern;
        let glob = Glob::new(pattern).map_err(|source| MatcherError::InvalidLocalePattern {
            pattern: pattern.clone(),
            source,
        })?;

        Ok(Self { file_matcher: glob.compile_matcher() })
    }

    /// Returns true if the file name matches `localeFiles.filePattern`.
    #[must_use]
    pub fn is_locale_file(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| self.file_matcher.is_match(name))
    }

    /// Language held by a locale file: the file name up to the first `.`, when
    /// that is a language code.
    ///
    /// # Examples
    /// - `src/locales/pt-PT.json` → `pt-PT`
    /// - `src/locales/de.locale.json` → `de`
    /// - `src/locales/README.json` → `None`
    #[must_use]
    pub fn language_of(&self, path: &Path) -> Option<String> {
        if !self.is_locale_file(path) {
            return None;
        }
        let name = path.file_name()?.to_str()?;
        let language = name.split('.').next()?;
        is_language_code(language).then(|| language.to_string())
    }

    /// Locale file for `language` inside `dir`.
    ///
    /// The first `*` of the pattern is replaced by the language
    /// (`*.locale.json` → `de.locale.json`). When that does not give back a
    /// file [`Self::language_of`] accepts for `language`, `<lang>.json` is used.
    #[must_use]
    pub fn path_for(&self, dir: &Path, language: &str) -> PathBuf {
        let pattern = self.file_matcher.glob().glob();
        if let Some((prefix, suffix)) = pattern.split_once('*') {
            let candidate = dir.join(format!("{prefix}{language}{suffix}"));
            if self.language_of(&candidate).as_deref() == Some(language) {
                return candidate;
            }
        }
        dir.join(format!("{language}.json"))
    }
}
