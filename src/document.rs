//! Locale documents: the tree model and its JSON codec.
mod codec;
mod types;

pub use codec::{
    OutputFormat,
    parse_document,
    parse_patch,
    to_json_string,
};
pub use types::{
    Document,
    DocumentError,
    Node,
};
