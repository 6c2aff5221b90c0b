//! JSON-RPC endpoint.

use axum::{Json, body::Bytes, extract::State};
use serde_json::Value;
use tracing::{debug, instrument};

use super::ErrorResponse;
use crate::api::state::AppState;
use crate::client::DartApi;
use crate::error::DispatchError;
use crate::rpc::{RpcRequest, RpcResponse};

/// Answer one JSON-RPC request.
///
/// Always responds 200; failures are carried in the `error` member with
/// code -32603.
#[utoipa::path(
    post,
    path = "/rpc",
    tag = "rpc",
    request_body = RpcRequest,
    responses(
        (status = 200, description = "JSON-RPC result or error envelope", body = RpcResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn rpc<A: DartApi + 'static>(
    State(state): State<AppState<A>>,
    body: Bytes,
) -> Json<RpcResponse> {
    let body = match serde_json::from_slice::<Value>(&body) {
        Ok(body) => body,
        Err(e) => {
            return Json(RpcResponse::from_result(
                Value::Null,
                Err(DispatchError::invalid_request(format!("Invalid request: {e}"))),
            ));
        }
    };
    let id = body.get("id").cloned().unwrap_or(Value::Null);

    let response = match serde_json::from_value::<RpcRequest>(body) {
        Ok(request) => {
            debug!(method = %request.method, "rpc request");
            state.rpc().respond(request).await
        }
        Err(e) => RpcResponse::from_result(
            id,
            Err(DispatchError::invalid_request(format!("Invalid request: {e}"))),
        ),
    };

    Json(response)
}
