//! Redirect lookup and composition service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::repositories::EntityRepository;
use crate::domain::{
    RedirectEntity, RedirectOverrides, RedirectRegistry, RedirectorSettings, compute_redirect_path,
};
use crate::error::AppError;

/// Service resolving entities of one type to their redirect URLs.
pub struct RedirectService<R: EntityRepository> {
    repository: Arc<R>,
    registry: Arc<RedirectRegistry>,
    settings: Arc<RedirectorSettings>,
}

impl<R: EntityRepository> RedirectService<R> {
    /// Creates a new redirect service.
    pub fn new(
        repository: Arc<R>,
        registry: Arc<RedirectRegistry>,
        settings: Arc<RedirectorSettings>,
    ) -> Self {
        Self {
            repository,
            registry,
            settings,
        }
    }

    /// Loads the entity a redirect route points at.
    ///
    /// Uses the configured `find_method` when there is one, the id lookup
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no entity matches `id`.
    /// Propagates repository errors.
    pub async fn find_for_redirect(&self, id: &str) -> Result<R::Entity, AppError> {
        let find_method = self
            .registry
            .config_for::<R::Entity>()
            .and_then(|config| config.find_method.clone());

        let found = match find_method.as_deref() {
            Some(finder) => {
                debug!(
                    resource = R::Entity::RESOURCE,
                    finder, id, "Finding entity with custom finder"
                );
                self.repository.find_by(finder, id).await?
            }
            None => self.repository.find_by_id(id).await?,
        };

        found.ok_or_else(|| {
            AppError::not_found(
                "Redirect target not found",
                json!({ "resource": R::Entity::RESOURCE, "id": id }),
            )
        })
    }

    /// Composes the redirect URL for `entity`.
    ///
    /// An unregistered entity type has no redirect and yields `None`.
    pub fn redirect_path(
        &self,
        entity: &R::Entity,
        overrides: &RedirectOverrides,
    ) -> Option<String> {
        let Some(config) = self.registry.config_for::<R::Entity>() else {
            warn!(
                resource = R::Entity::RESOURCE,
                "No redirect configuration registered"
            );
            return None;
        };

        compute_redirect_path(entity, &config, &self.settings, overrides)
    }

    /// Finds the entity for `id` and composes its redirect URL.
    ///
    /// # Errors
    ///
    /// See [`Self::find_for_redirect`].
    pub async fn resolve_redirect(
        &self,
        id: &str,
        overrides: &RedirectOverrides,
    ) -> Result<Option<String>, AppError> {
        let entity = self.find_for_redirect(id).await?;
        Ok(self.redirect_path(&entity, overrides))
    }
}

/// An entity listed in a resource catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Display text.
    pub label: String,
    /// Route id, unencoded.
    pub param: String,
}

/// Object-safe view of a [`RedirectService`], keyed by resource name.
#[async_trait]
pub trait RedirectResolver: Send + Sync {
    /// Route segment served by this resolver.
    fn resource(&self) -> &'static str;

    /// Resolves the redirect URL for the entity behind `id`.
    async fn resolve(
        &self,
        id: &str,
        overrides: &RedirectOverrides,
    ) -> Result<Option<String>, AppError>;

    /// Every entity of this resource, in repository order.
    async fn catalog(&self) -> Result<Vec<CatalogEntry>, AppError>;
}

#[async_trait]
impl<R: EntityRepository + 'static> RedirectResolver for RedirectService<R> {
    fn resource(&self) -> &'static str {
        R::Entity::RESOURCE
    }

    async fn resolve(
        &self,
        id: &str,
        overrides: &RedirectOverrides,
    ) -> Result<Option<String>, AppError> {
        self.resolve_redirect(id, overrides).await
    }

    async fn catalog(&self) -> Result<Vec<CatalogEntry>, AppError> {
        let entities = self.repository.list().await?;

        Ok(entities
            .iter()
            .map(|entity| CatalogEntry {
                label: entity.label(),
                param: entity.to_param(),
            })
            .collect())
    }
}
