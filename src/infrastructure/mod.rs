//! Infrastructure layer: concrete implementations of domain traits.
//!
//! - [`persistence`] - Entity stores backing the redirect routes

pub mod persistence;
