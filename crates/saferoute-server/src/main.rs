//! SafeRoute server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use saferoute_server::{app, logging, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Invalid configuration")?;
    logging::init(config.log_format)?;

    tracing::info!("Starting SafeRoute server...");
    tracing::debug!(?config, "Loaded configuration");

    let state = Arc::new(AppState::from_config(&config)?);
    let app = app(state);

    let addr: SocketAddr = format!("{}:{}", config.bind_addr, config.server_port)
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.bind_addr))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
