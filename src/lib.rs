//! Dart MCP server.
//!
//! Exposes the Dart task and doc API as a fixed catalog of operations over
//! MCP (stdio or Streamable HTTP) and a plain JSON-RPC endpoint.

pub mod api;
pub mod catalog;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod mcp;
pub mod prompts;
pub mod resources;
pub mod rpc;
pub mod validation;

#[cfg(test)]
mod prompts_test;

pub use catalog::Catalog;
pub use client::{DartApi, HttpDartClient};
pub use config::Config;
pub use dispatch::Dispatcher;
pub use error::DispatchError;
