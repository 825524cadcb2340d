//! Redirect route configuration.

use crate::api::handlers::redirect_handler;
use crate::state::AppState;
use axum::{Router, routing::get};

/// Route pattern served by [`redirect_handler`].
pub const REDIRECT_ROUTE: &str = "/{resource}/{id}/redirect";

/// Public redirect routes.
///
/// # Endpoints
///
/// - `GET /{resource}/{id}/redirect` - Script-redirect page for an entity
pub fn redirect_routes() -> Router<AppState> {
    Router::new().route(REDIRECT_ROUTE, get(redirect_handler))
}
