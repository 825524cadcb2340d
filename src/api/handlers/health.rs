//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Returns service status and the resources it can redirect.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "resources": ["products"],
///   "tracking_url": false,
///   "ignore_encoding_hosts": 5
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        resources: state.resources(),
        tracking_url: state.settings.active_tracking_url().is_some(),
        ignore_encoding_hosts: state.settings.ignore_encoding_hosts.len(),
    })
}
