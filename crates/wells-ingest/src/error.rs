//! Error types for ingestion runs

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an ingestion run
///
/// Per-item fetch failures are not errors at this level; they are recorded
/// in the [`RunSummary`](crate::RunSummary) and the run continues.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The store rejected a read or write; nothing further can be persisted
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// The worklist file could not be opened or read
    #[error("Failed to read worklist {path}: {source}")]
    Worklist {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Reading worklist lines failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
