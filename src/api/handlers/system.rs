//! System health and status handlers.

use axum::Json;
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

pub const ROOT_MESSAGE: &str =
    "Dart MCP HTTP server is running. Use POST /rpc for JSON-RPC requests.";

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    #[schema(example = "ok")]
    pub status: String,
}

/// Server banner
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Server is running", body = String, content_type = "text/plain")
    )
)]
#[instrument]
pub async fn root() -> &'static str {
    ROOT_MESSAGE
}

/// Health check endpoint
///
/// Returns the current health status of the server. Does not contact the
/// Dart backend.
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse)
    )
)]
#[instrument]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
