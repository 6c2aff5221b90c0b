//! HTTP front end.
//!
//! Serves `POST /rpc` (JSON-RPC over the shared router), the MCP Streamable
//! HTTP transport at `/mcp`, plus `/`, `/health` and the OpenAPI docs.

mod auth;
mod error;
mod handlers;
pub mod routes;
mod state;

#[cfg(test)]
mod routes_test;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::ApiError;
pub use handlers::{ErrorResponse, HealthResponse, ROOT_MESSAGE};
pub use state::AppState;

use crate::client::DartApi;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::mcp::create_mcp_service;
use crate::rpc::RpcRouter;

/// Initialize tracing subscriber with env filter
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dart_mcp=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the full application for `api`.
pub fn app<A: DartApi + 'static>(
    config: &Config,
    api: A,
    cancellation_token: CancellationToken,
) -> axum::Router {
    let rpc = Arc::new(RpcRouter::new(Dispatcher::new(api)));
    let mcp_service = create_mcp_service(Arc::clone(&rpc), cancellation_token);
    let state = AppState::new(rpc, config.token());

    routes::create_router(state, mcp_service).layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until Ctrl-C.
pub async fn run<A: DartApi + 'static>(config: Config, api: A) -> Result<(), ApiError> {
    let cancellation_token = CancellationToken::new();
    let app = app(&config, api, cancellation_token.clone());

    let addr = SocketAddr::new(config.host(), config.port());
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ApiError::Bind { addr, source })?;
    info!("Dart MCP HTTP server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
            cancellation_token.cancel();
        })
        .await
        .map_err(ApiError::Serve)?;
    Ok(())
}
