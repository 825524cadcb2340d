//! Web layer for browser-facing HTML.
//!
//! Uses Askama templates for server-side rendering.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`helpers`] - Redirect route and link helpers
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod helpers;
pub mod routes;
