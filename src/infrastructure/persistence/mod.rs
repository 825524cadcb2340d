//! Storage implementations of the domain repository traits.

mod in_memory_product_repository;

pub use in_memory_product_repository::{CatalogError, InMemoryProductRepository};
