//! MCP Streamable HTTP service creation
//!
//! Builds the service mounted at `/mcp` by the HTTP front end.

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::client::DartApi;
use crate::rpc::RpcRouter;

use super::server::DartMcpServer;

/// Create MCP Streamable HTTP service
///
/// # Example
/// ```no_run
/// use std::time::Duration;
///
/// use axum::Router;
/// use tokio_util::sync::CancellationToken;
/// # use dart_mcp::client::HttpDartClient;
/// # use dart_mcp::dispatch::Dispatcher;
/// # use dart_mcp::mcp::create_mcp_service;
/// # use dart_mcp::rpc::RpcRouter;
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let client = HttpDartClient::new("https://example.invalid", "token", Duration::from_secs(5))?;
///
/// let rpc = RpcRouter::new(Dispatcher::new(client));
/// let mcp_service = create_mcp_service(rpc, CancellationToken::new());
///
/// let app: Router = Router::new().nest_service("/mcp", mcp_service);
/// # Ok(())
/// # }
/// ```
pub fn create_mcp_service<A: DartApi + 'static>(
    rpc: impl Into<Arc<RpcRouter<A>>>,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<DartMcpServer<A>> {
    let server = DartMcpServer::new(rpc);

    // One handler per session, all sharing the same router
    // Returns io::Error to match rmcp's expected signature
    let service_factory = move || -> Result<DartMcpServer<A>, std::io::Error> { Ok(server.clone()) };

    let config = StreamableHttpServerConfig {
        stateful_mode: true,
        cancellation_token,
        ..Default::default()
    };

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}
