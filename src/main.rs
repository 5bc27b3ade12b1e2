//! Request relay service binary.
//!
//! Fronts the backend API under `/api/proxy/*`: any GET/POST/PUT/PATCH/DELETE
//! under that prefix is forwarded to the configured upstream origin and the
//! response is relayed back, minus hop-by-hop header hygiene.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use api_relay::config;
use api_relay::observability;
use api_relay::RelayServer;

#[derive(Parser)]
#[command(name = "api-relay")]
#[command(about = "Request relay fronting the backend API", long_about = None)]
struct Cli {
    /// Optional TOML config file; environment variables override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::from_env()?,
    };

    observability::init_tracing(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        site_origin = %config.site.origin,
        production = config.runtime.production,
        "configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = RelayServer::new(config);
    server.run(listener).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
