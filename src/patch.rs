//! Resolves which patch applies to each locale.
//!
//! A locale with its own `<patchesDir>/<lang>.json` gets exactly that patch.
//! Every other locale gets the fallback language's patch file, plus the
//! configured top-level sections copied out of the fallback locale file.

use std::path::{
    Path,
    PathBuf,
};

use crate::document::{
    Document,
    parse_document,
    parse_patch,
};
use crate::error::ProcessError;
use crate::merge::LocaleMerger;
use crate::storage::LocaleStore;

/// Where a resolved patch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOrigin {
    /// `<patchesDir>/<lang>.json`
    Custom,
    /// `<patchesDir>/<fallback>.json`
    FallbackPatch,
    /// Sections of `<localesDir>/<fallback>.json`
    FallbackSections,
}

/// Patch for one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPatch {
    pub patch: Document,
    pub origins: Vec<PatchOrigin>,
}

impl ResolvedPatch {
    /// True if the locale had no patch of its own.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        !self.origins.contains(&PatchOrigin::Custom)
    }
}

/// Finds patches. Fallback material is read once up front and shared by all locales.
#[derive(Debug, Clone)]
pub struct PatchResolver {
    /// Directory of per-language patch files
    patches_dir: PathBuf,
    /// Language whose material fills in for missing patches
    fallback_language: String,
    /// Parsed `<patchesDir>/<fallback>.json`, if present
    fallback_patch: Option<Document>,
    /// Requested sections of the fallback locale file, if any were found
    fallback_sections: Option<Document>,
}

impl PatchResolver {
    /// A resolver with no fallback material.
    fn new(patches_dir: impl Into<PathBuf>, fallback_language: impl Into<String>) -> Self {
        Self {
            patches_dir: patches_dir.into(),
            fallback_language: fallback_language.into(),
            fallback_patch: None,
            fallback_sections: None,
        }
    }

    /// Builds a resolver, loading the fallback patch and the fallback sections.
    ///
    /// # Arguments
    /// * `fallback_locale` - the fallback language's locale file
    /// * `sections` - top-level keys to copy from it
    ///
    /// # Errors
    /// A fallback file exists but cannot be read or parsed.
    pub fn load(
        store: &dyn LocaleStore,
        patches_dir: &Path,
        fallback_locale: &Path,
        fallback_language: &str,
        sections: &[String],
    ) -> Result<Self, ProcessError> {
        let mut resolver = Self::new(patches_dir, fallback_language);

        let fallback_path = resolver.patch_path(fallback_language);
        resolver.fallback_patch = read_patch(store, &fallback_path)?;
        if resolver.fallback_patch.is_none() {
            tracing::debug!(path = %fallback_path.display(), "No fallback patch file");
        }

        if !sections.is_empty() {
            resolver.fallback_sections = load_sections(store, fallback_locale, sections)?;
        }

        Ok(resolver)
    }

    #[must_use]
    pub fn patch_path(&self, language: &str) -> PathBuf {
        self.patches_dir.join(format!("{language}.json"))
    }

    /// Patch for `language`, or `None` when nothing applies.
    ///
    /// # Errors
    /// The language's own patch file cannot be read or parsed.
    pub fn resolve(
        &self,
        store: &dyn LocaleStore,
        language: &str,
    ) -> Result<Option<ResolvedPatch>, ProcessError> {
        if let Some(patch) = read_patch(store, &self.patch_path(language))? {
            return Ok(Some(ResolvedPatch { patch, origins: vec![PatchOrigin::Custom] }));
        }

        let mut origins = Vec::new();
        let mut patch = Document::new();

        if let Some(fallback) = &self.fallback_patch {
            patch = fallback.clone();
            origins.push(PatchOrigin::FallbackPatch);
        }

        if language != self.fallback_language
            && let Some(sections) = &self.fallback_sections
        {
            LocaleMerger::default().merge_into(&mut patch, sections.clone());
            origins.push(PatchOrigin::FallbackSections);
        }

        if origins.is_empty() {
            return Ok(None);
        }

        tracing::warn!(
            language,
            fallback = %self.fallback_language,
            "No custom translation, using fallback"
        );
        Ok(Some(ResolvedPatch { patch, origins }))
    }
}

/// Reads and parses a patch file; `Ok(None)` if it does not exist.
fn read_patch(store: &dyn LocaleStore, path: &Path) -> Result<Option<Document>, ProcessError> {
    let Some(text) =
        store.read(path).map_err(|source| ProcessError::Read { path: path.to_path_buf(), source })?
    else {
        return Ok(None);
    };

    parse_patch(&text)
        .map(Some)
        .map_err(|source| ProcessError::Parse { path: path.to_path_buf(), source })
}

/// Extracts the named top-level sections from a locale file.
fn load_sections(
    store: &dyn LocaleStore,
    locale_path: &Path,
    sections: &[String],
) -> Result<Option<Document>, ProcessError> {
    let Some(text) = store
        .read(locale_path)
        .map_err(|source| ProcessError::Read { path: locale_path.to_path_buf(), source })?
    else {
        tracing::warn!(path = %locale_path.display(), "Fallback locale file not found");
        return Ok(None);
    };

    let source = parse_document(&text)
        .map_err(|source| ProcessError::Parse { path: locale_path.to_path_buf(), source })?;

    let mut extracted = Document::new();
    for name in sections {
        match source.get(name) {
            Some(node) => {
                extracted.insert(name.clone(), node.clone());
            }
            None => {
                tracing::warn!(
                    section = %name,
                    path = %locale_path.display(),
                    "Fallback section not found"
                );
            }
        }
    }

    Ok((!extracted.is_empty()).then_some(extracted))
}
