//! Application layer services implementing redirect logic.
//!
//! Services combine repository lookups with the domain composer and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::redirect_service::RedirectService`] - Entity lookup and redirect URL composition

pub mod services;
