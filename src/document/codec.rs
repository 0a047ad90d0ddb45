//! Reading and writing locale documents as text.

use jsonc_parser::ParseOptions;
use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use super::{
    Document,
    DocumentError,
};

/// How documents are written back to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputFormat {
    /// Spaces per indentation level.
    pub indent: usize,
    /// Terminate the file with `\n`.
    pub final_newline: bool,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self { indent: 4, final_newline: false }
    }
}

/// Parse a persisted locale file.
///
/// # Errors
/// - `DocumentError::Parse` if the text is not valid JSON
/// - `DocumentError::MalformedInput` if the top level is not an object
pub fn parse_document(text: &str) -> Result<Document, DocumentError> {
    let value: Value = serde_json::from_str(text)?;
    Document::try_from(value)
}

/// Parse a hand-written patch file. Comments and trailing commas are accepted.
///
/// # Errors
/// - `DocumentError::JsoncParse` on syntax errors
/// - `DocumentError::Empty` if the file holds no value
/// - `DocumentError::MalformedInput` if the top level is not an object
pub fn parse_patch(text: &str) -> Result<Document, DocumentError> {
    let value = jsonc_parser::parse_to_serde_value(text, &ParseOptions::default())
        .map_err(|e| DocumentError::JsoncParse(e.to_string()))?
        .ok_or(DocumentError::Empty)?;
    Document::try_from(value)
}

/// Serialize a document as pretty JSON. Non-ASCII characters are written as-is.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn to_json_string(doc: &Document, format: &OutputFormat) -> Result<String, serde_json::Error> {
    let indent = " ".repeat(format.indent);
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    doc.serialize(&mut serializer)?;

    // serde_json only emits valid UTF-8
    let mut text = String::from_utf8_lossy(&buf).into_owned();
    if format.final_newline {
        text.push('\n');
    }
    Ok(text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::document::Node;

    #[rstest]
    fn test_parse_document_valid() {
        let doc = parse_document(r#"{"navbar": {"home": "Home"}}"#).unwrap();

        assert_eq!(doc.get_path(&["navbar", "home"]).and_then(Node::as_text), Some("Home"));
    }

    #[rstest]
    #[case("{\"a\": ")]
    #[case("not json")]
    #[case("{\"a\": 1,}")]
    fn test_parse_document_invalid_json(#[case] text: &str) {
        let result = parse_document(text);

        assert!(matches!(result, Err(DocumentError::Parse(_))));
    }

    #[rstest]
    fn test_parse_document_top_level_array() {
        let result = parse_document("[1, 2]");

        assert!(matches!(result, Err(DocumentError::MalformedInput { found: "an array" })));
    }

    #[rstest]
    fn test_parse_patch_accepts_comments_and_trailing_commas() {
        let text = r#"{
    // shown in the navigation bar
    "navbar": { "bugReports": "Reported Bugs", },
    /* block comment */
    "bugReports": { "title": "Reported Bugs" },
}"#;

        let doc = parse_patch(text).unwrap();

        assert_eq!(
            doc.get_path(&["navbar", "bugReports"]).and_then(Node::as_text),
            Some("Reported Bugs")
        );
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["navbar", "bugReports"]);
    }

    #[rstest]
    #[case("", "empty")]
    #[case("   // only a comment\n", "empty")]
    #[case("\"text\"", "malformed")]
    #[case("{\"a\": }", "syntax")]
    fn test_parse_patch_errors(#[case] text: &str, #[case] kind: &str) {
        let err = parse_patch(text).unwrap_err();

        let actual = match err {
            DocumentError::Empty => "empty",
            DocumentError::MalformedInput { .. } => "malformed",
            DocumentError::JsoncParse(_) => "syntax",
            DocumentError::Parse(_) => "json",
        };
        assert_eq!(actual, kind);
    }

    #[rstest]
    fn test_to_json_string_default_format() {
        let doc = Document::try_from(json!({ "a": { "b": "c" }, "d": [] })).unwrap();

        let text = to_json_string(&doc, &OutputFormat::default()).unwrap();

        assert_eq!(text, "{\n    \"a\": {\n        \"b\": \"c\"\n    },\n    \"d\": []\n}");
    }

    #[rstest]
    fn test_to_json_string_custom_indent_and_newline() {
        let doc = Document::try_from(json!({ "a": "b" })).unwrap();
        let format = OutputFormat { indent: 2, final_newline: true };

        let text = to_json_string(&doc, &format).unwrap();

        assert_eq!(text, "{\n  \"a\": \"b\"\n}\n");
    }

    #[googletest::test]
    fn test_to_json_string_keeps_non_ascii_literal() {
        let doc = Document::try_from(json!({
            "ja": "こんにちは",
            "ar": "تقارير الأخطاء",
            "es": "Análisis",
            "emoji": "🎯"
        }))
        .unwrap();

        let text = to_json_string(&doc, &OutputFormat::default()).unwrap();

        expect_that!(text, contains_substring("こんにちは"));
        expect_that!(text, contains_substring("تقارير الأخطاء"));
        expect_that!(text, contains_substring("Análisis"));
        expect_that!(text, contains_substring("🎯"));
        expect_that!(text, not(contains_substring("\\u")));
    }

    #[rstest]
    fn test_round_trip_preserves_content_and_order() {
        let original = Document::try_from(json!({
            "tutorial": {
                "common": { "next": "Siguiente", "previous": "Anterior" },
                "steps": 5
            },
            "help": { "beta": { "badge": "BETA" } },
            "subtitle": "Total de {{count}} reportes"
        }))
        .unwrap();

        let text = to_json_string(&original, &OutputFormat::default()).unwrap();
        let reparsed = parse_document(&text).unwrap();

        assert_eq!(reparsed, original);
        assert_eq!(reparsed.keys().collect::<Vec<_>>(), vec!["tutorial", "help", "subtitle"]);
    }

    mod properties {
        use proptest::prelude::*;

        use super::super::*;
        use crate::test_utils::arb_document;

        proptest! {
            #[test]
            fn serialized_documents_parse_back(doc in arb_document(), indent in 0usize..=8, final_newline in any::<bool>()) {
                let format = OutputFormat { indent, final_newline };

                let text = to_json_string(&doc, &format).unwrap();

                prop_assert_eq!(parse_document(&text).unwrap(), doc);
            }
        }
    }
}
