//! Repository trait definitions for the domain layer.
//!
//! Traits define the lookups the application layer needs; implementations
//! live in `crate::infrastructure::persistence`. Mock implementations are
//! generated via `mockall` for testing.

pub mod entity_repository;

pub use entity_repository::EntityRepository;

#[cfg(test)]
pub use entity_repository::MockEntityRepository;
