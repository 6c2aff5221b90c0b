use std::net::SocketAddr;

use miette::Diagnostic;
use thiserror::Error;

use crate::client::ClientError;

/// Failures starting or running the HTTP server.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Failed to bind {addr}")]
    #[diagnostic(
        code(dart_mcp::api::bind),
        help("Is another process using the port? Set PORT or pass --port to choose another.")
    )]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server error")]
    #[diagnostic(code(dart_mcp::api::serve))]
    Serve(#[source] std::io::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Client(#[from] ClientError),
}
