//! Deep merge of translation patches into locale documents.
mod merger;
mod report;

pub use merger::{
    LocaleMerger,
    MergePolicy,
    merge,
    merge_values,
};
pub use report::MergeReport;
