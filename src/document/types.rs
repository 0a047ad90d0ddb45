//! Locale document tree.

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;
use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

/// Errors raised while turning text or untyped JSON into a [`Document`].
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The text is not valid JSON.
    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The text is not valid JSON with comments.
    #[error("Failed to parse JSONC: {0}")]
    JsoncParse(String),

    /// The input contained no value at all.
    #[error("Document is empty")]
    Empty,

    /// The top level of the input is not an object.
    #[error("Expected a JSON object at the top level, found {found}")]
    MalformedInput {
        /// JSON type name of what was found instead
        found: &'static str,
    },
}

/// A value inside a locale document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    /// Translated text, possibly containing placeholders such as `{{count}}`.
    Text(String),
    /// Any other JSON leaf (number, boolean, null, array). Never merged into.
    Literal(Value),
    /// Nested section.
    Map(Document),
}

impl Node {
    /// Returns the nested document if this node is a section.
    #[must_use]
    pub const fn as_map(&self) -> Option<&Document> {
        match self {
            Self::Map(doc) => Some(doc),
            Self::Text(_) | Self::Literal(_) => None,
        }
    }

    /// Returns the text if this node is a translated string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Literal(_) | Self::Map(_) => None,
        }
    }

}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Object(map) => Self::Map(Document::from(map)),
            other => Self::Literal(other),
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Text(text) => Self::String(text),
            Node::Literal(value) => value,
            Node::Map(doc) => doc.into(),
        }
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Document> for Node {
    fn from(doc: Document) -> Self {
        Self::Map(doc)
    }
}

/// Insertion-ordered mapping from keys to [`Node`]s.
///
/// Key order is kept exactly as read so that rewritten files produce small diffs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document {
    /// Entries in file order
    entries: IndexMap<String, Node>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    /// Inserts a value, returning the previous one. New keys go to the end.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<Node>) -> Option<Node> {
        self.entries.insert(key.into(), node.into())
    }

    pub fn entry(&mut self, key: String) -> Entry<'_, String, Node> {
        self.entries.entry(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Looks up a nested value by key path (e.g. `["navbar", "home"]`).
    #[must_use]
    pub fn get_path(&self, path: &[&str]) -> Option<&Node> {
        let (last, parents) = path.split_last()?;
        let mut current = self;
        for part in parents {
            current = current.get(part)?.as_map()?;
        }
        current.get(last)
    }

    /// Flatten into `separator`-joined key paths mapped to leaf nodes, in
    /// document order.
    ///
    /// Empty sections produce no entries.
    #[must_use]
    pub fn flatten(&self, separator: &str) -> IndexMap<String, &Node> {
        let mut result = IndexMap::new();
        self.flatten_into(separator, None, &mut result);
        result
    }

    /// Recursive step of [`Self::flatten`].
    fn flatten_into<'a>(
        &'a self,
        separator: &str,
        prefix: Option<&str>,
        result: &mut IndexMap<String, &'a Node>,
    ) {
        for (key, node) in &self.entries {
            let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
            match node {
                Node::Map(nested) => nested.flatten_into(separator, Some(&full_key), result),
                Node::Text(_) | Node::Literal(_) => {
                    result.insert(full_key, node);
                }
            }
        }
    }
}

impl IntoIterator for Document {
    type Item = (String, Node);
    type IntoIter = indexmap::map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, Node)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl From<Map<String, Value>> for Document {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().map(|(k, v)| (k, Node::from(v))).collect()
    }
}

impl TryFrom<Value> for Document {
    type Error = DocumentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(map.into()),
            other => Err(DocumentError::MalformedInput { found: json_type_name(&other) }),
        }
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Self::Object(doc.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
    }
}

/// JSON type name used in error messages.
pub(crate) const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
