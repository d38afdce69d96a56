//! Wells API
//!
//! Read-only HTTP surface over the well record store.
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | `GET` | `/wells/:api` | The stored record, or 404 |
//! | `POST` | `/wells/polygon-search` | Wells strictly inside the posted polygon |
//! | `GET` | `/health` | Status and record count |
//!
//! Errors are returned as `{"error": "..."}`.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ApiConfig;
use handlers::{create_router, AppState};
use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;
use wells_store::SqliteStore;

/// API server error
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the HTTP server and run until `shutdown` resolves
pub async fn start_server<F>(config: &ApiConfig, store: SqliteStore, shutdown: F) -> Result<(), ApiError>
where
    F: Future<Output = ()> + Send + 'static,
{
    config.validate().map_err(ApiError::Config)?;

    let well_count = store.count().map_err(|e| ApiError::Server(e.to_string()))?;
    info!("Starting wells API");
    info!("Stored wells: {}", well_count);

    let app = create_router(AppState::new(store));

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("API listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ApiError::Server(e.to_string()))?;

    info!("API stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_config_rejected_before_binding() {
        let config = ApiConfig {
            bind_address: String::new(),
            ..Default::default()
        };
        let store = SqliteStore::new(":memory:").unwrap();

        let err = start_server(&config, store, async {}).await.unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[tokio::test]
    async fn test_shutdown_future_stops_server() {
        let config = ApiConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 0,
        };
        let store = SqliteStore::new(":memory:").unwrap();

        start_server(&config, store, async {}).await.unwrap();
    }
}
