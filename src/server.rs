//! HTTP server initialization and runtime setup.
//!
//! Builds the redirect registry, loads the catalog and runs the Axum server.

use crate::config::Config;
use crate::domain::RedirectRegistry;
use crate::domain::entities::Product;
use crate::infrastructure::persistence::InMemoryProductRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Registers the redirect configuration of every bundled entity type.
pub fn default_registry() -> RedirectRegistry {
    let registry = RedirectRegistry::new();
    registry.register(Product::redirect_config());
    registry
}

/// Loads the product catalog named by the configuration.
///
/// # Errors
///
/// Returns an error if the catalog file cannot be read or parsed.
pub fn load_catalog(config: &Config) -> Result<InMemoryProductRepository> {
    let Some(ref path) = config.catalog_path else {
        tracing::warn!("CATALOG_PATH not set, serving an empty catalog");
        return Ok(InMemoryProductRepository::new());
    };

    let repository = InMemoryProductRepository::from_json_file(path)
        .with_context(|| format!("Failed to load catalog from {}", path))?;
    tracing::info!("Loaded {} products from {}", repository.len(), path);

    Ok(repository)
}

/// Builds the application state for `config`.
///
/// # Errors
///
/// Returns an error if the settings or catalog are invalid.
pub fn build_state(config: &Config) -> Result<AppState> {
    let settings = Arc::new(config.redirector_settings()?);
    let registry = Arc::new(default_registry());
    let products = Arc::new(load_catalog(config)?);

    Ok(AppState::new(registry, settings).with_repository(products))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - State construction fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config)?;
    tracing::info!("Serving resources: {}", state.resources().join(", "));

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
