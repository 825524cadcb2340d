//! Handler for the script-redirect page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use serde_json::json;
use tracing::{debug, info};

use crate::domain::RedirectOverrides;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::helpers::js_string_literal;

/// Page whose only job is to send the browser on to `url`.
///
/// Renders `templates/redirect.html`.
#[derive(Template, WebTemplate)]
#[template(path = "redirect.html")]
pub struct RedirectTemplate {
    /// Target URL, HTML-escaped by the template for the `<noscript>` link.
    pub url: String,
    /// Target URL as a JavaScript string literal.
    pub location: String,
}

impl RedirectTemplate {
    pub fn new(url: String) -> Self {
        let location = js_string_literal(&url);
        Self { url, location }
    }
}

/// Renders the redirect page for an entity.
///
/// # Endpoint
///
/// `GET /{resource}/{id}/redirect`
///
/// # Request Flow
///
/// 1. Pick the resolver registered for `resource`
/// 2. Find the entity (custom finder if configured)
/// 3. Compose its redirect URL
/// 4. Return a page running `document.location.href = "<url>";`
///
/// # Errors
///
/// Returns 404 Not Found if the resource is unknown, the entity does not
/// exist, or the entity has no destination URL.
pub async fn redirect_handler(
    Path((resource, id)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<RedirectTemplate, AppError> {
    let resolver = state.resolver(&resource).ok_or_else(|| {
        AppError::not_found("Unknown resource", json!({ "resource": resource }))
    })?;

    let Some(url) = resolver.resolve(&id, &RedirectOverrides::default()).await? else {
        debug!(%resource, %id, "Entity has no destination URL");
        return Err(AppError::not_found(
            "No redirect target for this entity",
            json!({ "resource": resource, "id": id }),
        ));
    };

    info!(%resource, %id, "Redirecting");
    Ok(RedirectTemplate::new(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_renders_script_redirect() {
        let html = RedirectTemplate::new(
            "http://network.com?url=http%3A%2F%2Fstore.com%2Fproduct&epi=product_foobar"
                .to_string(),
        )
        .render()
        .unwrap();

        assert!(html.contains(
            r#"document.location.href = "http://network.com?url=http%3A%2F%2Fstore.com%2Fproduct&epi=product_foobar";"#
        ));
        assert!(html.contains(
            r#"<a href="http://network.com?url=http%3A%2F%2Fstore.com%2Fproduct&amp;epi=product_foobar" rel="nofollow">"#
        ));
    }

    #[test]
    fn test_template_cannot_close_script() {
        let html = RedirectTemplate::new("http://x.com/</script><script>alert(1)".to_string())
            .render()
            .unwrap();

        assert!(!html.contains("</script><script>"));
    }
}
