//! enrollment-gateway server entry point.
//!
//! Loads configuration, opens the store, and serves the REST API until a
//! shutdown signal arrives.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use enrollment_gateway::app_state::AppState;
use enrollment_gateway::config::{GatewayConfig, LogFormat};
use enrollment_gateway::persistence;
use enrollment_gateway::server::{build_app, shutdown_signal};
use enrollment_gateway::service::EnrollmentService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = GatewayConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(
        addr = %config.listen_addr,
        backend = %config.storage_backend,
        "starting enrollment-gateway"
    );
    tracing::debug!(?config, "configuration loaded");

    // Build persistence and service layers
    let repository = persistence::connect(&config)
        .await
        .context("connecting to enrollment store")?;
    let service = EnrollmentService::new(Arc::clone(&repository), config.field_policy);

    // Build router
    let app = build_app(AppState::new(service), &config);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    repository.close().await;
    tracing::info!("enrollment store closed");

    Ok(())
}
