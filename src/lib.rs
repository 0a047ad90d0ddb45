//! locale-merge
//!
//! Deep-merges translation patches into per-locale JSON files.

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod merge;
pub mod patch;
pub mod runner;
pub mod storage;

#[cfg(test)]
mod test_utils;

pub use cli::Cli;
pub use document::{
    Document,
    Node,
};
pub use merge::{
    LocaleMerger,
    MergePolicy,
    merge,
};
pub use runner::{
    LocaleRunner,
    RunSummary,
};
