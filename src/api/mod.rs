//! HTTP layer for the redirect endpoints.
//!
//! # Modules
//!
//! - [`dto`] - JSON response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request processing middleware
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
