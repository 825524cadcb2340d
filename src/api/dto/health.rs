//! DTOs for health check endpoint.

use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Resources served under `/{resource}/{id}/redirect`.
    pub resources: Vec<&'static str>,
    /// Whether composed URLs are wrapped in a tracking template.
    pub tracking_url: bool,
    /// Number of ignore-encoding host patterns.
    pub ignore_encoding_hosts: usize,
}
