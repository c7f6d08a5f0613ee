//! Type definitions for shelfswap

mod error;
mod listing;
mod report;

pub use error::*;
pub use listing::*;
pub use report::*;

/// Dataset loading warning types
#[derive(Debug, Clone, PartialEq)]
pub enum LoadWarning {
    /// File could not be opened or read; the dataset was treated as empty
    FileUnavailable { dataset: String, reason: String },
    /// Malformed rows were skipped while parsing
    RowsSkipped { dataset: String, count: usize },
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadWarning::FileUnavailable { dataset, reason } => {
                write!(f, "failed to load {}: {}", dataset, reason)
            }
            LoadWarning::RowsSkipped { dataset, count } => {
                write!(f, "skipped {} malformed row(s) in {}", count, dataset)
            }
        }
    }
}
