//! HTTP route configuration.

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use rmcp::transport::streamable_http_server::StreamableHttpService;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::auth::require_bearer;
use super::handlers::{self, ErrorResponse, HealthResponse};
use super::state::AppState;
use crate::client::DartApi;
use crate::mcp::DartMcpServer;
use crate::rpc::{RpcRequest, RpcResponse};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dart MCP HTTP API",
        version = "0.1.0",
        description = "JSON-RPC access to Dart tasks, docs, dartboards, folders and views. \
                       /rpc and /mcp require `Authorization: Bearer <DART_TOKEN>`.",
        license(name = "MIT")
    ),
    paths(handlers::root, handlers::health, handlers::rpc),
    components(schemas(HealthResponse, ErrorResponse, RpcRequest, RpcResponse)),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "rpc", description = "JSON-RPC tool, prompt and resource methods")
    )
)]
pub struct ApiDoc;

/// Create the HTTP router with OpenAPI documentation
///
/// `/rpc` and the nested MCP service sit behind bearer authentication;
/// `/`, `/health` and `/docs` are open.
pub fn create_router<A: DartApi + 'static>(
    state: AppState<A>,
    mcp_service: StreamableHttpService<DartMcpServer<A>>,
) -> Router {
    let api = ApiDoc::openapi();

    let system_routes = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health));

    let protected_routes = Router::new()
        .route("/rpc", post(handlers::rpc::<A>))
        .nest_service("/mcp", mcp_service)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer::<A>,
        ));

    system_routes
        .merge(protected_routes)
        .merge(Scalar::with_url("/docs", api))
        .with_state(state)
}
