//! Product entity, the catalog item users are redirected to.

use serde::Deserialize;

use crate::domain::accessor::Accessor;
use crate::domain::entity::RedirectEntity;
use crate::domain::redirect_config::RedirectConfig;

/// A catalog product linked to a partner store.
///
/// `name` doubles as the route parameter, so redirect links look like
/// `/products/{name}/redirect`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    /// Product page on the partner store.
    #[serde(default)]
    pub url: Option<String>,
    /// Affiliate network template with `{url}` / `{epi}` tokens.
    #[serde(default)]
    pub affiliate_uri: Option<String>,
    /// Explicit tracking id; derived from the name when absent.
    #[serde(default)]
    pub epi: Option<String>,
}

impl Product {
    /// Creates a product without store or affiliate links.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            url: None,
            affiliate_uri: None,
            epi: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_affiliate_uri(mut self, affiliate_uri: impl Into<String>) -> Self {
        self.affiliate_uri = Some(affiliate_uri.into());
        self
    }

    pub fn with_epi(mut self, epi: impl Into<String>) -> Self {
        self.epi = Some(epi.into());
        self
    }

    /// Tracking id sent to affiliate networks.
    pub fn tracking_id(&self) -> String {
        self.epi
            .clone()
            .unwrap_or_else(|| format!("product_{}", self.name))
    }

    /// Redirect configuration used for products.
    ///
    /// Base from `affiliate_uri`, destination from `url`, `epi` from
    /// [`Product::tracking_id`]; route ids are resolved by name.
    pub fn redirect_config() -> RedirectConfig<Self> {
        RedirectConfig::new(Accessor::field("affiliate_uri"), Accessor::field("url"))
            .with_epi(Accessor::function(|product: &Product| {
                Some(product.tracking_id())
            }))
            .with_find_method("find_by_name")
    }
}

impl RedirectEntity for Product {
    const RESOURCE: &'static str = "products";

    fn read_field(&self, name: &str) -> Option<String> {
        let value = match name {
            "id" => Some(self.id.to_string()),
            "name" => Some(self.name.clone()),
            "url" => self.url.clone(),
            "affiliate_uri" => self.affiliate_uri.clone(),
            "epi" => self.epi.clone(),
            _ => None,
        };
        value.filter(|v| !v.is_empty())
    }

    fn to_param(&self) -> String {
        self.name.clone()
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}
