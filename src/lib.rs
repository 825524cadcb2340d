//! # Redirector
//!
//! Affiliate redirect service built with Axum.
//!
//! Entity types register how their redirect URL is built: an affiliate base
//! template, a destination URL and a tracking id (`epi`). Links point at an
//! internal `/{resource}/{id}/redirect` page which sends the browser on to
//! the composed URL.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Redirect configuration, URL composer, repository traits
//! - **Application Layer** ([`application`]) - Entity lookup and redirect resolution
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory entity store
//! - **API Layer** ([`api`]) - Redirect and health handlers, middleware
//! - **Web Layer** ([`web`]) - Link helpers and catalog pages
//!
//! ## Composing a URL
//!
//! ```ignore
//! use redirector::prelude::*;
//!
//! let product = Product::new(1, "foobar")
//!     .with_url("http://store.com/product")
//!     .with_affiliate_uri("http://network.com?url={url}&epi={epi}");
//!
//! let url = compute_redirect_path(
//!     &product,
//!     &Product::redirect_config(),
//!     &RedirectorSettings::new(),
//!     &RedirectOverrides::default(),
//! );
//! assert_eq!(
//!     url.as_deref(),
//!     Some("http://network.com?url=http%3A%2F%2Fstore.com%2Fproduct&epi=product_foobar")
//! );
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{RedirectResolver, RedirectService};
    pub use crate::domain::entities::Product;
    pub use crate::domain::{
        Accessor, IgnoreEncodingHosts, RedirectConfig, RedirectEntity, RedirectOverrides,
        RedirectRegistry, RedirectorSettings, compute_redirect_path,
    };
    pub use crate::error::AppError;
    pub use crate::state::AppState;
    pub use crate::web::helpers::{HtmlOptions, redirect_link_to, redirect_route_path};
}
