//! Business logic services for the application layer.

pub mod redirect_service;

pub use redirect_service::{CatalogEntry, RedirectResolver, RedirectService};
