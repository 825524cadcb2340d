//! Contract implemented by every entity type that can be redirected to.

/// An entity whose redirect URL is built from its fields.
///
/// Field reads are by name so a [`crate::domain::RedirectConfig`] can refer
/// to them without knowing the concrete type.
pub trait RedirectEntity: Send + Sync + 'static {
    /// Route segment for this entity type, e.g. `products`.
    const RESOURCE: &'static str;

    /// Reads a field by name. Unknown fields and empty values read as `None`.
    fn read_field(&self, name: &str) -> Option<String>;

    /// Identifier used in the redirect route.
    fn to_param(&self) -> String;

    /// Human-readable text for links pointing at this entity.
    fn label(&self) -> String {
        self.to_param()
    }
}
