//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Store error
    #[error("Store error: {0}")]
    Store(#[from] wells_store::StoreError),

    /// Ingestion aborted
    #[error("Ingestion failed: {0}")]
    Ingest(#[from] wells_ingest::IngestError),

    /// HTTP server error
    #[error("Server error: {0}")]
    Api(#[from] wells_api::ApiError),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Transport(#[from] wells_fetcher::TransportError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested record does not exist
    #[error("{0}")]
    NotFound(String),
}
