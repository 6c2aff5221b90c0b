//! Dart MCP HTTP server binary.
//!
//! Serves JSON-RPC on `POST /rpc` and MCP Streamable HTTP on `/mcp`.

use std::net::IpAddr;
use std::time::Duration;

use clap::Parser;
use dart_mcp::api;
use dart_mcp::{Config, HttpDartClient};
use miette::Result;

#[derive(Parser)]
#[command(name = "dart-mcp-http")]
#[command(author, version, about = "Dart MCP HTTP server", long_about = None)]
struct Cli {
    /// Host address to bind to (overrides HOST, default 0.0.0.0)
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on (overrides PORT, default 3000)
    #[arg(short, long)]
    port: Option<u16>,

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
    api::init_tracing();

    let mut config = Config::from_env()?;
    if let Some(host) = cli.host {
        config = config.with_host(host);
    }
    if let Some(port) = cli.port {
        config = config.with_port(port);
    }
    if let Some(base_url) = cli.dart_host {
        config = config.with_base_url(base_url);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let client = HttpDartClient::from_config(&config)?;
    api::run(config, client).await?;

    Ok(())
}
