//! Dart MCP server over stdio.
//!
//! stdout carries the protocol, so all logging goes to stderr.

use std::time::Duration;

use clap::Parser;
use dart_mcp::mcp::DartMcpServer;
use dart_mcp::rpc::RpcRouter;
use dart_mcp::{Config, Dispatcher, HttpDartClient};
use miette::{IntoDiagnostic, Result};
use rmcp::ServiceExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dart-mcp")]
#[command(author, version, about = "Dart MCP server (stdio transport)", long_about = None)]
struct Cli {
    /// Dart API base URL (overrides DART_HOST)
    #[arg(long)]
    dart_host: Option<String>,

    /// Backend request timeout in seconds (overrides DART_TIMEOUT_SECS)
    #[arg(long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let _ = rustls::crypto::ring::default_provider().install_default();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dart_mcp=debug,tower_http=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::from_env()?;
    if let Some(base_url) = cli.dart_host {
        config = config.with_base_url(base_url);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let client = HttpDartClient::from_config(&config)?;
    let server = DartMcpServer::new(RpcRouter::new(Dispatcher::new(client)));

    info!(base_url = config.base_url(), "Dart MCP Server running on stdio");

    let service = server
        .serve(rmcp::transport::io::stdio())
        .await
        .into_diagnostic()?;
    service.waiting().await.into_diagnostic()?;

    Ok(())
}
