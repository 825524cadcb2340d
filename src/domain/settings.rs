//! Redirector-wide settings shared by every entity type.

use crate::domain::host_pattern::IgnoreEncodingHosts;

/// Settings applied to every composed redirect URL.
///
/// Built once at startup (see [`crate::config::Config::redirector_settings`])
/// and shared read-only through [`crate::state::AppState`].
#[derive(Debug, Clone, Default)]
pub struct RedirectorSettings {
    /// Outer template wrapping the composed URL at its `{url}` token.
    pub tracking_url: Option<String>,
    /// Hosts whose destination URL is embedded without percent-encoding.
    pub ignore_encoding_hosts: IgnoreEncodingHosts,
    /// Percent-encode the composed URL before placing it in the tracking wrap.
    pub encode_tracking_url: bool,
}

impl RedirectorSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tracking_url(mut self, tracking_url: impl Into<String>) -> Self {
        self.tracking_url = Some(tracking_url.into());
        self
    }

    pub fn with_ignore_encoding_hosts(mut self, hosts: IgnoreEncodingHosts) -> Self {
        self.ignore_encoding_hosts = hosts;
        self
    }

    pub fn with_encoded_tracking_url(mut self, encode: bool) -> Self {
        self.encode_tracking_url = encode;
        self
    }

    /// The tracking template, if set and not blank.
    pub fn active_tracking_url(&self) -> Option<&str> {
        self.tracking_url
            .as_deref()
            .filter(|template| !template.trim().is_empty())
    }
}
