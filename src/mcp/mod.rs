//! Model Context Protocol (MCP) front end
//!
//! The same server answers over stdio (`dart-mcp` binary) and over the
//! Streamable HTTP transport mounted at `/mcp` by the HTTP front end.

pub mod server;
mod service;

#[cfg(test)]
mod server_test;

pub use server::DartMcpServer;
pub use service::create_mcp_service;
