//! Value sources for redirect configuration fields.

use std::fmt;
use std::sync::Arc;

use crate::domain::entity::RedirectEntity;

/// Function accessor signature.
pub type AccessorFn<E> = Arc<dyn Fn(&E) -> Option<String> + Send + Sync>;

/// Where a redirect configuration value comes from.
pub enum Accessor<E> {
    /// A fixed string. Placeholders inside it are kept verbatim.
    Literal(String),
    /// A field read through [`RedirectEntity::read_field`].
    Field(String),
    /// A function applied to the entity.
    Function(AccessorFn<E>),
}

impl<E: RedirectEntity> Accessor<E> {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }

    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&E) -> Option<String> + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    /// Resolves the value for `entity`. A miss is `None`, never an error.
    pub fn resolve(&self, entity: &E) -> Option<String> {
        match self {
            Self::Literal(value) => Some(value.clone()),
            Self::Field(name) => entity.read_field(name),
            Self::Function(f) => f(entity),
        }
    }
}

impl<E> Clone for Accessor<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Literal(value) => Self::Literal(value.clone()),
            Self::Field(name) => Self::Field(name.clone()),
            Self::Function(f) => Self::Function(Arc::clone(f)),
        }
    }
}

impl<E> fmt::Debug for Accessor<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}
