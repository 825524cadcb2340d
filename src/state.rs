//! Shared application state injected into handlers.

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::services::{RedirectResolver, RedirectService};
use crate::domain::repositories::EntityRepository;
use crate::domain::{RedirectRegistry, RedirectorSettings};

/// State shared by all handlers.
///
/// Resolvers are keyed by resource name, the first segment of
/// `/{resource}/{id}/redirect`.
#[derive(Clone)]
pub struct AppState {
    pub resolvers: Arc<HashMap<&'static str, Arc<dyn RedirectResolver>>>,
    pub registry: Arc<RedirectRegistry>,
    pub settings: Arc<RedirectorSettings>,
}

impl AppState {
    pub fn new(registry: Arc<RedirectRegistry>, settings: Arc<RedirectorSettings>) -> Self {
        Self {
            resolvers: Arc::new(HashMap::new()),
            registry,
            settings,
        }
    }

    /// Adds a resolver, replacing any previous one for the same resource.
    pub fn with_resolver(mut self, resolver: Arc<dyn RedirectResolver>) -> Self {
        Arc::make_mut(&mut self.resolvers).insert(resolver.resource(), resolver);
        self
    }

    /// Serves entities from `repository` using the shared registry and settings.
    pub fn with_repository<R: EntityRepository + 'static>(self, repository: Arc<R>) -> Self {
        let service = RedirectService::new(
            repository,
            Arc::clone(&self.registry),
            Arc::clone(&self.settings),
        );
        self.with_resolver(Arc::new(service))
    }

    pub fn resolver(&self, resource: &str) -> Option<Arc<dyn RedirectResolver>> {
        self.resolvers.get(resource).cloned()
    }

    /// Resources with a resolver, sorted.
    pub fn resources(&self) -> Vec<&'static str> {
        let mut resources: Vec<_> = self.resolvers.keys().copied().collect();
        resources.sort_unstable();
        resources
    }
}
