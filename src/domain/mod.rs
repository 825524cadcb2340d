//! Domain layer: redirect configuration and URL composition.
//!
//! Independent of HTTP and storage concerns.
//!
//! # Architecture
//!
//! - [`entity`] - [`RedirectEntity`] contract for redirectable types
//! - [`accessor`] - literal / field / function value sources
//! - [`redirect_config`] - per-entity-type [`RedirectConfig`]
//! - [`registry`] - [`RedirectRegistry`], one config per entity type
//! - [`settings`] - [`RedirectorSettings`] shared by all entity types
//! - [`host_pattern`] - ignore-encoding host patterns
//! - [`template`] - `{token}` substitution
//! - [`composer`] - [`compute_redirect_path`]
//! - [`entities`] - concrete entity types
//! - [`repositories`] - lookup traits implemented by infrastructure

pub mod accessor;
pub mod composer;
pub mod entities;
pub mod entity;
pub mod host_pattern;
pub mod redirect_config;
pub mod registry;
pub mod repositories;
pub mod settings;
pub mod template;

pub use accessor::Accessor;
pub use composer::{RedirectOverrides, compute_redirect_path};
pub use entity::RedirectEntity;
pub use host_pattern::{HostPattern, HostPatternError, IgnoreEncodingHosts};
pub use redirect_config::RedirectConfig;
pub use registry::RedirectRegistry;
pub use settings::RedirectorSettings;
