use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::document::OutputFormat;
use crate::merge::MergePolicy;

/// Widest accepted indentation.
const MAX_INDENT: usize = 16;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "languages[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeSettings {
    /// Directory holding `<lang>.json` locale files, relative to the workspace root.
    pub locales_dir: String,
    /// Directory holding `<lang>.json` patch files, relative to the workspace root.
    pub patches_dir: String,

    /// Locales to update.
    ///
    /// - `None`: every file in `localesDir` matching `localeFiles.filePattern`,
    ///   except the fallback language (default)
    /// - `Some([...])`: exactly these, in this order
    pub languages: Option<Vec<String>>,
    /// Locales skipped during discovery.
    pub exclude_languages: Vec<String>,

    /// Source of the patch for locales without a patch of their own.
    pub fallback_language: String,
    /// Top-level sections copied from the fallback locale file into locales
    /// that have no patch of their own.
    pub fallback_sections: Vec<String>,

    pub policy: MergePolicy,
    /// Joins key paths in log output.
    pub key_separator: String,

    pub locale_files: LocaleFilesConfig,
    pub output: OutputFormat,
    pub concurrency: ConcurrencyConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocaleFilesConfig {
    /// Glob matched against file names inside `localesDir`.
    pub file_pattern: String,
}

impl Default for LocaleFilesConfig {
    fn default() -> Self {
        Self { file_pattern: "*.json".to_string() }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ConcurrencyConfig {
    /// Locale files processed at the same time.
    /// Default: 80% of CPU cores (minimum 1).
    pub num_threads: Option<usize>,
}

impl ConcurrencyConfig {
    #[must_use]
    pub fn effective_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(|| (num_cpus::get() * 4 / 5).max(1))
    }
}

impl MergeSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Invalid language code
    /// - Out-of-range numbers
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.locales_dir.is_empty() {
            errors.push(ValidationError::new(
                "localesDir",
                "The directory cannot be empty. Example: \"src/locales\"",
            ));
        }

        if self.patches_dir.is_empty() {
            errors.push(ValidationError::new(
                "patchesDir",
                "The directory cannot be empty. Example: \"locale-patches\"",
            ));
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.fallback_language.is_empty() {
            errors.push(ValidationError::new(
                "fallbackLanguage",
                "The language cannot be empty. Example: \"en\"",
            ));
        } else if !is_language_code(&self.fallback_language) {
            errors.push(ValidationError::new(
                "fallbackLanguage",
                format!("Invalid language code '{}'", self.fallback_language),
            ));
        }

        if let Some(languages) = &self.languages {
            if languages.is_empty() {
                errors.push(ValidationError::new(
                    "languages",
                    "At least one language is required, or remove this field to discover locale files",
                ));
            }
            for (index, lang) in languages.iter().enumerate() {
                if !is_language_code(lang) {
                    errors.push(ValidationError::new(
                        format!("languages[{index}]"),
                        format!("Invalid language code '{lang}'. Example: \"pt-PT\""),
                    ));
                }
            }
        }

        for (index, lang) in self.exclude_languages.iter().enumerate() {
            if !is_language_code(lang) {
                errors.push(ValidationError::new(
                    format!("excludeLanguages[{index}]"),
                    format!("Invalid language code '{lang}'"),
                ));
            }
        }

        for (index, section) in self.fallback_sections.iter().enumerate() {
            if section.is_empty() {
                errors.push(ValidationError::new(
                    format!("fallbackSections[{index}]"),
                    "The section name cannot be empty",
                ));
            }
        }

        if self.locale_files.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "localeFiles.filePattern",
                "The pattern cannot be empty. Example: \"*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.locale_files.file_pattern) {
            errors.push(ValidationError::new(
                "localeFiles.filePattern",
                format!("Invalid glob pattern '{}': {e}", self.locale_files.file_pattern),
            ));
        }

        if self.output.indent > MAX_INDENT {
            errors.push(ValidationError::new(
                "output.indent",
                format!("Indentation must be between 0 and {MAX_INDENT}, got {}", self.output.indent),
            ));
        }

        if self.concurrency.num_threads == Some(0) {
            errors.push(ValidationError::new(
                "concurrency.numThreads",
                "At least one thread is required. Remove this field to use the default",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Loose BCP 47 shape check: a 2-3 letter language followed by
/// alphanumeric subtags separated by `-` or `_` (`en`, `pt-PT`, `zh_Hant`).
#[must_use]
pub fn is_language_code(code: &str) -> bool {
    let mut parts = code.split(['-', '_']);
    let Some(language) = parts.next() else {
        return false;
    };
    if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    parts.all(|part| {
        (2..=8).contains(&part.len()) && part.chars().all(|c| c.is_ascii_alphanumeric())
    })
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            locales_dir: "src/locales".to_string(),
            patches_dir: "locale-patches".to_string(),
            languages: None,
            exclude_languages: Vec::new(),
            fallback_language: "en".to_string(),
            fallback_sections: Vec::new(),
            policy: MergePolicy::default(),
            key_separator: ".".to_string(),
            locale_files: LocaleFilesConfig::default(),
            output: OutputFormat::default(),
            concurrency: ConcurrencyConfig::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = MergeSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"languages": ["de", "pt-PT"], "policy": "insert-missing"}"#;

        let settings: MergeSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.locales_dir, eq("src/locales"));
        assert_that!(settings.languages, some(elements_are![eq("de"), eq("pt-PT")]));
        assert_that!(settings.policy, eq(MergePolicy::InsertMissing));
        assert_that!(settings.output.indent, eq(4));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let json = "{}";

        let settings: MergeSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.fallback_language, eq("en"));
        assert_that!(settings.patches_dir, eq("locale-patches"));
        assert_that!(settings.languages, none());
        assert_that!(settings.locale_files.file_pattern, eq("*.json"));
        assert_that!(settings.policy, eq(MergePolicy::Overwrite));
        assert_that!(settings.output.final_newline, eq(false));
    }

    #[rstest]
    fn deserialize_nested_sections() {
        let json = r#"{
            "fallbackSections": ["tutorial", "help"],
            "output": {"indent": 2, "finalNewline": true},
            "concurrency": {"numThreads": 3}
        }"#;

        let settings: MergeSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.fallback_sections, elements_are![eq("tutorial"), eq("help")]);
        assert_that!(settings.output.indent, eq(2));
        assert_that!(settings.output.final_newline, eq(true));
        assert_that!(settings.concurrency.effective_threads(), eq(3));
    }

    #[rstest]
    fn deserialize_unknown_policy_fails() {
        let result = serde_json::from_str::<MergeSettings>(r#"{"policy": "replace"}"#);

        assert!(result.is_err());
    }

    #[rstest]
    fn validate_invalid_key_separator_empty() {
        let settings = MergeSettings { key_separator: String::new(), ..MergeSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("keySeparator")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_languages_empty() {
        let settings = MergeSettings { languages: Some(vec![]), ..MergeSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("languages")),
                field!(ValidationError.message, contains_substring("At least one language"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_language_code() {
        let settings = MergeSettings {
            languages: Some(vec!["de".to_string(), "../etc".to_string()]),
            ..MergeSettings::default()
        };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("languages[1]")),
                field!(ValidationError.message, contains_substring("../etc"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_file_pattern() {
        let settings = MergeSettings {
            locale_files: LocaleFilesConfig { file_pattern: "*.{json".to_string() },
            ..MergeSettings::default()
        };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("localeFiles.filePattern")),
                field!(ValidationError.message, contains_substring("Invalid glob pattern"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_thread_count_zero() {
        let settings = MergeSettings {
            concurrency: ConcurrencyConfig { num_threads: Some(0) },
            ..MergeSettings::default()
        };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![field!(ValidationError.field_path, eq("concurrency.numThreads"))])
        );
    }

    #[rstest]
    fn validate_invalid_indent_too_wide() {
        let settings = MergeSettings {
            output: OutputFormat { indent: 40, final_newline: false },
            ..MergeSettings::default()
        };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![field!(ValidationError.field_path, eq("output.indent"))])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = MergeSettings {
            locales_dir: String::new(),
            fallback_language: "english!".to_string(),
            ..MergeSettings::default()
        };

        let validation_result = settings.validate();
        let errors = validation_result.unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. localesDir"));
        assert_that!(error_message, contains_substring("cannot be empty"));
        assert_that!(error_message, contains_substring("2. fallbackLanguage"));
        assert_that!(error_message, contains_substring("Invalid language code"));
    }

    #[rstest]
    #[case("en", true)]
    #[case("pt-PT", true)]
    #[case("zh_Hant", true)]
    #[case("sr-Cyrl-BA", true)]
    #[case("kok", true)]
    #[case("e", false)]
    #[case("english", false)]
    #[case("en-", false)]
    #[case("en/US", false)]
    #[case("", false)]
    fn test_is_language_code(#[case] code: &str, #[case] expected: bool) {
        assert_eq!(is_language_code(code), expected);
    }
}
