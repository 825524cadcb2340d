//! HTML template rendering handlers.

mod catalog;

pub use catalog::{CatalogLink, CatalogTemplate, catalog_handler};
