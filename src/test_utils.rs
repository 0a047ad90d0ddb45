//! Test helpers shared by several test modules.
#![cfg(test)]

use std::path::Path;

use proptest::prelude::*;
use serde_json::{
    Value,
    json,
};

use crate::document::{
    Document,
    Node,
};
use crate::storage::MemoryStore;

/// Builds a `Document` from a `json!` value.
///
/// # Panics
/// If the top level is not an object.
#[allow(clippy::expect_used)]
pub(crate) fn doc(value: Value) -> Document {
    Document::try_from(value).expect("test document must be a JSON object")
}

/// A `MemoryStore` holding the given files.
///
/// # Arguments
/// * `files` - pairs of path and contents
pub(crate) fn memory_store(files: &[(&str, &str)]) -> MemoryStore {
    let store = MemoryStore::new();
    for (path, contents) in files {
        store.insert(Path::new(path), *contents);
    }
    store
}

/// Leaf nodes: text (including non-ASCII) and the JSON literals that
/// survive a text round trip exactly.
fn arb_leaf() -> impl Strategy<Value = Node> {
    prop_oneof![
        3 => "\\PC{0,8}".prop_map(Node::Text),
        1 => any::<i64>().prop_map(|n| Node::Literal(json!(n))),
        1 => any::<bool>().prop_map(|b| Node::Literal(json!(b))),
        1 => Just(Node::Literal(Value::Null)),
        1 => prop::collection::vec("[a-z]{0,3}", 0..3).prop_map(|items| Node::Literal(json!(items))),
    ]
}

/// Arbitrary nested documents up to four levels deep.
///
/// Keys come from a small alphabet without `.` so that target and patch
/// overlap often and flattened paths split back unambiguously.
pub(crate) fn arb_document() -> impl Strategy<Value = Document> {
    let node = arb_leaf().prop_recursive(3, 32, 4, |inner| {
        prop::collection::vec(("[a-d]", inner), 0..4)
            .prop_map(|entries| Node::Map(entries.into_iter().collect()))
    });
    prop::collection::vec(("[a-d]", node), 0..5).prop_map(|entries| entries.into_iter().collect())
}
