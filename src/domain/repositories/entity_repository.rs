//! Repository trait for looking up redirect entities.

use crate::domain::entity::RedirectEntity;
use crate::error::AppError;
use async_trait::async_trait;

/// Lookup interface for one entity type.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryProductRepository`] - in-memory catalog
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock(type Entity = crate::domain::entities::Product;))]
#[async_trait]
pub trait EntityRepository: Send + Sync {
    type Entity: RedirectEntity;

    /// Finds an entity by its primary id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_id(&self, id: &str) -> Result<Option<Self::Entity>, AppError>;

    /// Finds an entity through a named finder, e.g. `find_by_name`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the finder is unknown to this repository.
    async fn find_by(&self, finder: &str, key: &str) -> Result<Option<Self::Entity>, AppError>;

    /// Lists every entity in a stable order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list(&self) -> Result<Vec<Self::Entity>, AppError>;
}
