//! Web page route configuration.

use crate::state::AppState;
use crate::web::handlers::catalog_handler;
use axum::{Router, routing::get};

/// Public HTML pages.
///
/// # Endpoints
///
/// - `GET /{resource}` - Catalog of redirect links for a resource
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/{resource}", get(catalog_handler))
}
