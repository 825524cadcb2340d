//! View helpers for linking to redirect routes.
//!
//! Links never point at the affiliate URL directly. They target the internal
//! `/{resource}/{id}/redirect` route so the script-redirect page runs first.

use askama::Template;

use crate::domain::RedirectEntity;

/// Path of the redirect route for an entity of type `E`.
///
/// ```ignore
/// assert_eq!(redirect_route_path::<Product>("123"), "/products/123/redirect");
/// ```
pub fn redirect_route_path<E: RedirectEntity>(param: &str) -> String {
    resource_redirect_path(E::RESOURCE, param)
}

/// Path of the redirect route for `param` under `resource`.
///
/// `param` is percent-encoded as a single path segment; the `Path`
/// extractor decodes it again.
pub fn resource_redirect_path(resource: &str, param: &str) -> String {
    format!("/{}/{}/redirect", resource, urlencoding::encode(param))
}

/// Path of the redirect route for `entity`.
pub fn redirect_path_for<E: RedirectEntity>(entity: &E) -> String {
    redirect_route_path::<E>(&entity.to_param())
}

/// Ordered HTML attributes for an anchor.
///
/// Setting an attribute that already exists replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlOptions {
    attributes: Vec<(String, String)>,
}

impl HtmlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, keeping the original position if already present.
    pub fn set(&mut self, name: impl Into<String>, value: impl ToString) {
        let name = name.into();
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Builder form of [`Self::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Applies every attribute of `other` over `self`.
    pub fn merge(mut self, other: &HtmlOptions) -> Self {
        for (name, value) in &other.attributes {
            self.set(name.clone(), value);
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for HtmlOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (name, value) in iter {
            options.set(name, value);
        }
        options
    }
}

/// Attributes every redirect link starts with.
fn default_link_options() -> HtmlOptions {
    HtmlOptions::new()
        .with("data-external", "true")
        .with("rel", "nofollow")
}

#[derive(Template)]
#[template(
    source = r#"<a{% for (name, value) in attributes %} {{ name }}="{{ value }}"{% endfor %} href="{{ href }}">{% if markup %}{{ content|safe }}{% else %}{{ content }}{% endif %}</a>"#,
    ext = "html"
)]
struct AnchorTemplate<'a> {
    attributes: Vec<(String, String)>,
    href: &'a str,
    content: &'a str,
    markup: bool,
}

fn render_anchor(
    entity_path: &str,
    html_options: &HtmlOptions,
    content: &str,
    markup: bool,
) -> askama::Result<String> {
    let options = default_link_options().merge(html_options);
    AnchorTemplate {
        attributes: options.attributes,
        href: entity_path,
        content,
        markup,
    }
    .render()
}

/// Anchor pointing at the redirect route of `entity`, with `label` as text.
///
/// Caller options are merged over `data-external="true"` and
/// `rel="nofollow"`; `href` always comes last. Label and attribute values
/// are HTML-escaped.
///
/// # Errors
///
/// Returns the template error if rendering fails.
pub fn redirect_link_to<E: RedirectEntity>(
    label: &str,
    entity: &E,
    html_options: &HtmlOptions,
) -> askama::Result<String> {
    render_anchor(&redirect_path_for(entity), html_options, label, false)
}

/// Anchor with `label` as text pointing at an already built redirect `path`.
///
/// # Errors
///
/// Returns the template error if rendering fails.
pub fn redirect_link_to_path(
    label: &str,
    path: &str,
    html_options: &HtmlOptions,
) -> askama::Result<String> {
    render_anchor(path, html_options, label, false)
}

/// Block form of [`redirect_link_to`]: the anchor body comes from `content`
/// and is inserted as markup, unescaped.
///
/// # Errors
///
/// Returns the template error if rendering fails.
pub fn redirect_link_to_with<E, F>(
    entity: &E,
    html_options: &HtmlOptions,
    content: F,
) -> askama::Result<String>
where
    E: RedirectEntity,
    F: FnOnce() -> String,
{
    let body = content();
    render_anchor(&redirect_path_for(entity), html_options, &body, true)
}

/// Serializes `url` as a JavaScript string literal safe inside `<script>`.
pub fn js_string_literal(url: &str) -> String {
    serde_json::Value::from(url)
        .to_string()
        .replace("</", "<\\/")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}
