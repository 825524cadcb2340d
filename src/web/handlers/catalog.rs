//! Catalog page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::helpers::{HtmlOptions, redirect_link_to_path, resource_redirect_path};

/// A catalog entry rendered as an internal redirect link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLink {
    pub label: String,
    pub html: String,
}

/// Template for a resource catalog.
///
/// Renders `templates/catalog.html` with one redirect link per entity.
#[derive(Template, WebTemplate)]
#[template(path = "catalog.html")]
pub struct CatalogTemplate {
    pub resource: String,
    pub links: Vec<CatalogLink>,
}

/// Renders every entity of a resource as a redirect link.
///
/// # Endpoint
///
/// `GET /{resource}`
///
/// # Errors
///
/// Returns 404 Not Found if no resolver serves `resource`.
pub async fn catalog_handler(
    Path(resource): Path<String>,
    State(state): State<AppState>,
) -> Result<CatalogTemplate, AppError> {
    let resolver = state.resolver(&resource).ok_or_else(|| {
        AppError::not_found("Unknown resource", json!({ "resource": resource }))
    })?;

    let options = HtmlOptions::new();
    let links = resolver
        .catalog()
        .await?
        .into_iter()
        .map(|entry| {
            let path = resource_redirect_path(resolver.resource(), &entry.param);
            redirect_link_to_path(&entry.label, &path, &options)
                .map(|html| CatalogLink {
                    label: entry.label,
                    html,
                })
                .map_err(|e| {
                    AppError::internal("Failed to render link", json!({ "reason": e.to_string() }))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CatalogTemplate { resource, links })
}
