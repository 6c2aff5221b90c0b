//! Application state for the HTTP server.

use std::sync::Arc;

use crate::client::DartApi;
use crate::rpc::RpcRouter;

/// Shared application state.
///
/// Holds the RPC router every request is answered by and the bearer token
/// callers must present.
pub struct AppState<A> {
    rpc: Arc<RpcRouter<A>>,
    token: Arc<str>,
}

// Manual Clone impl - only the Arcs are cloned, A need not be Clone
impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            rpc: Arc::clone(&self.rpc),
            token: Arc::clone(&self.token),
        }
    }
}

impl<A: DartApi> AppState<A> {
    pub fn new(rpc: impl Into<Arc<RpcRouter<A>>>, token: impl Into<Arc<str>>) -> Self {
        Self {
            rpc: rpc.into(),
            token: token.into(),
        }
    }

    pub fn rpc(&self) -> &RpcRouter<A> {
        &self.rpc
    }

    /// Get a cloned Arc to the router.
    pub fn rpc_arc(&self) -> Arc<RpcRouter<A>> {
        Arc::clone(&self.rpc)
    }

    /// The token callers must present as `Authorization: Bearer <token>`.
    pub fn token(&self) -> &str {
        &self.token
    }
}
