//! Bearer token authentication for `/rpc` and `/mcp`.

use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;
use tracing::warn;

use super::handlers::ErrorResponse;
use super::state::AppState;
use crate::client::DartApi;

type Rejection = (StatusCode, Json<ErrorResponse>);

fn unauthorized(message: &str) -> Rejection {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

/// Reject the request unless it carries the configured bearer token.
pub async fn require_bearer<A: DartApi + 'static>(
    State(state): State<AppState<A>>,
    request: Request,
    next: Next,
) -> Result<Response, Rejection> {
    let provided = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| unauthorized("Missing or invalid Authorization header"))?;

    let matches: bool = provided.as_bytes().ct_eq(state.token().as_bytes()).into();
    if !matches {
        warn!(path = %request.uri().path(), "rejected request with invalid token");
        return Err(unauthorized("Invalid token"));
    }

    Ok(next.run(request).await)
}
