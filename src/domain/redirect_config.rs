//! Per-entity-type redirect configuration.

use std::fmt;

use crate::domain::accessor::Accessor;
use crate::domain::entity::RedirectEntity;

/// How redirect URLs are built for one entity type.
///
/// - `base` - affiliate URL template with `{url}` and/or `{epi}` tokens
/// - `path` - destination URL
/// - `epi` - tracking identifier
/// - `find_method` - repository finder used by
///   [`crate::application::services::RedirectService::find_for_redirect`];
///   `None` means lookup by id
pub struct RedirectConfig<E> {
    pub base: Accessor<E>,
    pub path: Accessor<E>,
    pub epi: Option<Accessor<E>>,
    pub find_method: Option<String>,
}

impl<E: RedirectEntity> RedirectConfig<E> {
    pub fn new(base: Accessor<E>, path: Accessor<E>) -> Self {
        Self {
            base,
            path,
            epi: None,
            find_method: None,
        }
    }

    pub fn with_epi(mut self, epi: Accessor<E>) -> Self {
        self.epi = Some(epi);
        self
    }

    pub fn with_find_method(mut self, find_method: impl Into<String>) -> Self {
        self.find_method = Some(find_method.into());
        self
    }
}

impl<E> Clone for RedirectConfig<E> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            path: self.path.clone(),
            epi: self.epi.clone(),
            find_method: self.find_method.clone(),
        }
    }
}

impl<E> fmt::Debug for RedirectConfig<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedirectConfig")
            .field("base", &self.base)
            .field("path", &self.path)
            .field("epi", &self.epi)
            .field("find_method", &self.find_method)
            .finish()
    }
}
