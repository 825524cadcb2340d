//! Concrete entity types served by the redirector.
//!
//! - [`Product`] - A catalog item linking to a partner store

pub mod product;

pub use product::Product;
