//! HTTP request handlers for public endpoints.

pub mod health;
pub mod redirect;

pub use health::health_handler;
pub use redirect::redirect_handler;
