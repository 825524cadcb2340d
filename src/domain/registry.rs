//! Registry of redirect configurations, one per entity type.

use std::any::{Any, TypeId};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info};

use crate::domain::entity::RedirectEntity;
use crate::domain::redirect_config::RedirectConfig;

type ErasedConfig = Arc<dyn Any + Send + Sync>;

/// Holds the [`RedirectConfig`] of each registered entity type.
///
/// Registering a type again replaces its configuration.
#[derive(Default)]
pub struct RedirectRegistry {
    configs: RwLock<HashMap<TypeId, ErasedConfig>>,
    resources: RwLock<BTreeSet<&'static str>>,
}

impl RedirectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `config` for `E`, returning true if it replaced an earlier one.
    pub fn register<E: RedirectEntity>(&self, config: RedirectConfig<E>) -> bool {
        let replaced = self
            .configs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(TypeId::of::<E>(), Arc::new(config))
            .is_some();

        self.resources
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(E::RESOURCE);

        if replaced {
            info!(resource = E::RESOURCE, "Redirect configuration replaced");
        } else {
            debug!(resource = E::RESOURCE, "Redirect configuration registered");
        }

        replaced
    }

    /// Returns the configuration registered for `E`.
    pub fn config_for<E: RedirectEntity>(&self) -> Option<Arc<RedirectConfig<E>>> {
        let erased = self
            .configs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<E>())
            .cloned()?;

        erased.downcast::<RedirectConfig<E>>().ok()
    }

    pub fn is_registered<E: RedirectEntity>(&self) -> bool {
        self.configs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<E>())
    }

    /// Registered resource names, sorted.
    pub fn resources(&self) -> Vec<&'static str> {
        self.resources
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect()
    }
}
