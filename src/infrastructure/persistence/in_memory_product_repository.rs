//! In-memory implementation of the product repository.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use serde_json::json;

use crate::domain::entities::Product;
use crate::domain::repositories::EntityRepository;
use crate::error::AppError;

/// Errors raised while loading a product catalog file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate product id {0} in catalog")]
    DuplicateId(u64),
}

/// Product store kept in memory, ordered by id.
///
/// Supports the `find_by_id` and `find_by_name` finders.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<BTreeMap<u64, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository from a list of products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an id.
    pub fn with_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();
        for product in products {
            let id = product.id;
            if map.insert(id, product).is_some() {
                return Err(CatalogError::DuplicateId(id));
            }
        }
        Ok(Self {
            products: RwLock::new(map),
        })
    }

    /// Loads products from a JSON array file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file cannot be read or parsed, or
    /// contains duplicate ids.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: display.clone(),
            source,
        })?;
        let products: Vec<Product> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: display,
                source,
            })?;

        Self::with_products(products)
    }

    /// Inserts or replaces a product.
    pub fn insert(&self, product: Product) {
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product.id, product);
    }

    pub fn len(&self) -> usize {
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find_by_name(&self, name: &str) -> Option<Product> {
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .find(|product| product.name == name)
            .cloned()
    }
}

#[async_trait]
impl EntityRepository for InMemoryProductRepository {
    type Entity = Product;

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError> {
        let Ok(id) = id.parse::<u64>() else {
            return Ok(None);
        };

        Ok(self
            .products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned())
    }

    async fn find_by(&self, finder: &str, key: &str) -> Result<Option<Product>, AppError> {
        match finder {
            "find_by_id" | "find" => self.find_by_id(key).await,
            "find_by_name" => Ok(self.find_by_name(key)),
            _ => Err(AppError::internal(
                "Unknown finder",
                json!({ "finder": finder, "resource": "products" }),
            )),
        }
    }

    async fn list(&self) -> Result<Vec<Product>, AppError> {
        Ok(self
            .products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect())
    }
}
