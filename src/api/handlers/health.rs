//! Health check endpoint for liveness probes

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status (always "ok" when responding)
    pub status: String,
}

/// Returns 200 OK once the API server is serving. The server only starts
/// after both backends were reached, so answering implies startup succeeded.
pub async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    (StatusCode::OK, Json(HealthResponse { status: "ok".to_string() }))
}
