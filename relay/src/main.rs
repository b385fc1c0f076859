//! Relay entrypoint
//!
//! Listens on `PORT` (default 3001) and forwards prompts upstream.

use anyhow::{Context, Result, anyhow};
use layers_relay::{AppState, RelayConfig, build_app};
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config =
        RelayConfig::load().map_err(|e| anyhow!("Failed to read relay configuration: {}", e))?;

    if config.api_key().is_none() {
        warn!("GEMINI_API_KEY is not set; prompts will be rejected");
    }
    info!(
        "Model {} via {}; allowed origins: {}",
        config.model, config.upstream_base, config.allowed_origins
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = build_app(AppState::new(config).context("Failed to build HTTP client")?);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Relay listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
