//! Error types for dataset loading and output writing

use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that abort a pipeline run
///
/// Malformed cells are never reported here; they are defaulted during
/// normalisation instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// One of the two input datasets could not be read
    #[error("Failed to load the {dataset} dataset from {}. Please check that the file exists.", path.display())]
    DatasetUnavailable {
        /// Which dataset failed ("training" or "inference")
        dataset: &'static str,
        /// Path that was attempted
        path: PathBuf,
        /// Underlying IO failure
        #[source]
        source: std::io::Error,
    },

    /// The file was readable but not valid CSV
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Output serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
