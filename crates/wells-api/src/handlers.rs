//! HTTP request handlers for the well lookup API.
//!
//! Implements record lookup, polygon search and health check endpoints using
//! axum.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error};
use wells_domain::{ApiNumber, Coordinate, GeoError, Polygon, WellRecord, WellStore};
use wells_store::{SqliteStore, StoreError};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Record store; SQLite connections are not `Sync`, so access is serialized
    pub store: Arc<Mutex<SqliteStore>>,
}

impl AppState {
    /// Wrap a store for sharing across handlers
    pub fn new(store: SqliteStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    fn store(&self) -> Result<MutexGuard<'_, SqliteStore>, AppError> {
        self.store
            .lock()
            .map_err(|_| AppError::Internal("store lock poisoned".to_string()))
    }
}

/// One match of a polygon search
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PolygonSearchResult {
    /// API number of the well
    pub api_number: ApiNumber,
    /// Latitude of the well
    pub latitude: f64,
    /// Longitude of the well
    pub longitude: f64,
}

impl From<&WellRecord> for PolygonSearchResult {
    fn from(record: &WellRecord) -> Self {
        Self {
            api_number: record.api_number.clone(),
            latitude: record.latitude,
            longitude: record.longitude,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Number of stored wells
    pub well_count: usize,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// No record for the requested API number
    NotFound(String),
    /// Malformed request body or geometry
    BadRequest(String),
    /// Store failure
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                error!("request failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<GeoError> for AppError {
    fn from(e: GeoError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest(e.body_text())
    }
}

/// GET /wells/:api - Look up one well
async fn get_well(
    State(state): State<AppState>,
    Path(api): Path<String>,
) -> Result<Json<WellRecord>, AppError> {
    let not_found = || AppError::NotFound(format!("Well with API {} not found.", api));
    let api_number = ApiNumber::parse(&api).map_err(|_| not_found())?;

    let record = state.store()?.find_by_api_number(&api_number)?;
    record.map(Json).ok_or_else(not_found)
}

/// POST /wells/polygon-search - Wells strictly inside a polygon
async fn polygon_search(
    State(state): State<AppState>,
    body: Result<Json<Vec<Coordinate>>, JsonRejection>,
) -> Result<Json<Vec<PolygonSearchResult>>, AppError> {
    let Json(vertices) = body?;
    let polygon = Polygon::new(vertices)?;

    let candidates = state.store()?.list_with_coordinates()?;
    let results: Vec<PolygonSearchResult> = polygon
        .filter(&candidates)
        .into_iter()
        .map(PolygonSearchResult::from)
        .collect();

    debug!(
        vertices = polygon.vertices().len(),
        candidates = candidates.len(),
        matches = results.len(),
        "polygon search"
    );
    Ok(Json(results))
}

/// GET /health - Health check with record count
async fn health_check(State(state): State<AppState>) -> Result<Json<HealthCheckResponse>, AppError> {
    let well_count = state.store()?.count()?;
    Ok(Json(HealthCheckResponse {
        status: "healthy".to_string(),
        well_count,
    }))
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/wells/polygon-search", post(polygon_search))
        .route("/wells/:api", get(get_well))
        .route("/health", get(health_check))
        .with_state(state)
}
