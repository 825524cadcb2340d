//! Top-level router configuration combining redirect and web routes.
//!
//! # Route Structure
//!
//! - `GET  /health`                   - Health check (JSON)
//! - `GET  /{resource}`               - Catalog of redirect links (HTML)
//! - `GET  /{resource}/{id}/redirect` - Script-redirect page (HTML)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the router with all routes and middleware, without path
/// normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(api::routes::redirect_routes())
        .merge(web::routes::public_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router, trimming trailing slashes before routing.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
