//! Redirect URL composition.
//!
//! Combines an affiliate base template, a destination URL and a tracking id
//! (`epi`) into the outbound redirect URL, optionally wrapped by the global
//! tracking template.
//!
//! # Evaluation order
//!
//! 1. Destination: `landing_page` override, else the configured `path`.
//!    Nothing to redirect to yields `None`.
//! 2. Base template: a blank base yields the destination unescaped.
//! 3. Destination is percent-encoded unless the base host is ignore-listed.
//! 4. `epi`: override, else configured value, else empty.
//! 5. `{url}` and `{epi}` are filled in one pass.
//! 6. The result is placed in the tracking template when one is set.

use std::borrow::Cow;

use tracing::{debug, trace};

use crate::domain::entity::RedirectEntity;
use crate::domain::redirect_config::RedirectConfig;
use crate::domain::settings::RedirectorSettings;
use crate::domain::template;

/// Per-call overrides for [`compute_redirect_path`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectOverrides {
    /// Replaces the configured destination URL.
    pub landing_page: Option<String>,
    /// Replaces the configured tracking id.
    pub epi: Option<String>,
}

impl RedirectOverrides {
    pub fn landing_page(url: impl Into<String>) -> Self {
        Self {
            landing_page: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn with_epi(mut self, epi: impl Into<String>) -> Self {
        self.epi = Some(epi.into());
        self
    }
}

/// Builds the redirect URL for `entity`.
///
/// Returns `None` only when there is no destination URL. Every other miss
/// degrades: no base gives the bare destination, no `epi` gives an empty
/// substitution.
pub fn compute_redirect_path<E: RedirectEntity>(
    entity: &E,
    config: &RedirectConfig<E>,
    settings: &RedirectorSettings,
    overrides: &RedirectOverrides,
) -> Option<String> {
    let path_url = match &overrides.landing_page {
        Some(landing_page) => Some(landing_page.clone()),
        None => config.path.resolve(entity),
    }
    .filter(|url| !is_blank(url))?;

    let Some(affiliate_base) = config.base.resolve(entity).filter(|base| !is_blank(base)) else {
        debug!(
            resource = E::RESOURCE,
            "No affiliate base, redirecting to destination as-is"
        );
        return Some(path_url);
    };

    let embedded_url: Cow<'_, str> = match settings.ignore_encoding_hosts.match_url(&affiliate_base)
    {
        Some(pattern) => {
            trace!(%pattern, "Affiliate host ignore-listed, embedding destination unescaped");
            Cow::Borrowed(path_url.as_str())
        }
        None => urlencoding::encode(&path_url),
    };

    let epi_value = overrides
        .epi
        .clone()
        .or_else(|| config.epi.as_ref().and_then(|epi| epi.resolve(entity)))
        .unwrap_or_default();

    let composed = template::fill(&affiliate_base, |name| match name {
        "url" => Some(embedded_url.as_ref()),
        "epi" => Some(epi_value.as_str()),
        _ => None,
    });

    match settings.active_tracking_url() {
        Some(tracking_url) => Some(wrap_tracking(
            tracking_url,
            &composed,
            settings.encode_tracking_url,
        )),
        None => Some(composed),
    }
}

/// Places `composed` into the `{url}` token of `tracking_url`.
fn wrap_tracking(tracking_url: &str, composed: &str, encode: bool) -> String {
    let inner = if encode {
        urlencoding::encode(composed)
    } else {
        Cow::Borrowed(composed)
    };

    template::fill(tracking_url, |name| (name == "url").then_some(inner.as_ref()))
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::accessor::Accessor;
    use crate::domain::host_pattern::IgnoreEncodingHosts;

    #[derive(Debug, Clone)]
    struct Offer {
        name: String,
        url: Option<String>,
        affiliate_uri: Option<String>,
    }

    impl RedirectEntity for Offer {
        const RESOURCE: &'static str = "offers";

        fn read_field(&self, name: &str) -> Option<String> {
            match name {
                "name" => Some(self.name.clone()),
                "url" => self.url.clone(),
                "affiliate_uri" => self.affiliate_uri.clone(),
                _ => None,
            }
        }

        fn to_param(&self) -> String {
            self.name.clone()
        }
    }

    fn offer() -> Offer {
        Offer {
            name: "foobar".to_string(),
            url: Some("http://store.com/product".to_string()),
            affiliate_uri: Some("http://network.com?url={url}&epi={epi}".to_string()),
        }
    }

    fn config() -> RedirectConfig<Offer> {
        RedirectConfig::new(Accessor::field("affiliate_uri"), Accessor::field("url")).with_epi(
            Accessor::function(|o: &Offer| Some(format!("product_{}", o.name))),
        )
    }

    fn settings() -> RedirectorSettings {
        RedirectorSettings::new().with_ignore_encoding_hosts(
            IgnoreEncodingHosts::parse([
                "click.affiliator.com",
                "track.adtraction.com",
                "*.partner-ads.com",
                "*.smartresponse-media.com",
                "ads.guava-affiliate.com",
            ])
            .unwrap(),
        )
    }

    fn compose(entity: &Offer, config: &RedirectConfig<Offer>) -> Option<String> {
        compute_redirect_path(entity, config, &settings(), &RedirectOverrides::default())
    }

    #[test]
    fn test_generates_redirect_path() {
        assert_eq!(
            compose(&offer(), &config()).as_deref(),
            Some("http://network.com?url=http%3A%2F%2Fstore.com%2Fproduct&epi=product_foobar")
        );
    }

    #[test]
    fn test_landing_page_override_replaces_path_only() {
        let url = compute_redirect_path(
            &offer(),
            &config(),
            &settings(),
            &RedirectOverrides::landing_page("http://example.com/custom"),
        );
        assert_eq!(
            url.as_deref(),
            Some("http://network.com?url=http%3A%2F%2Fexample.com%2Fcustom&epi=product_foobar")
        );
    }

    #[test]
    fn test_epi_override() {
        let url = compute_redirect_path(
            &offer(),
            &config(),
            &settings(),
            &RedirectOverrides::default().with_epi("newsletter"),
        );
        assert_eq!(
            url.as_deref(),
            Some("http://network.com?url=http%3A%2F%2Fstore.com%2Fproduct&epi=newsletter")
        );
    }

    #[test]
    fn test_ignore_listed_host_skips_escaping() {
        let entity = Offer {
            affiliate_uri: Some("http://click.affiliator.com?url={url}&epi={epi}".to_string()),
            ..offer()
        };
        assert_eq!(
            compose(&entity, &config()).as_deref(),
            Some("http://click.affiliator.com?url=http://store.com/product&epi=product_foobar")
        );
    }

    #[test]
    fn test_mixed_case_ignore_listed_host_skips_escaping() {
        let entity = Offer {
            affiliate_uri: Some("http://Click.Affiliator.com?url={url}".to_string()),
            ..offer()
        };
        let settings = RedirectorSettings::new().with_ignore_encoding_hosts(
            IgnoreEncodingHosts::parse(["Click.Affiliator.com"]).unwrap(),
        );
        assert_eq!(
            compute_redirect_path(&entity, &config(), &settings, &RedirectOverrides::default())
                .as_deref(),
            Some("http://Click.Affiliator.com?url=http://store.com/product")
        );
    }

    #[test]
    fn test_wildcard_host_skips_escaping() {
        let entity = Offer {
            affiliate_uri: Some("https://www.partner-ads.com/klikbanner.php?htmlurl={url}".into()),
            ..offer()
        };
        assert_eq!(
            compose(&entity, &config()).as_deref(),
            Some("https://www.partner-ads.com/klikbanner.php?htmlurl=http://store.com/product")
        );
    }

    #[test]
    fn test_lookalike_host_is_escaped() {
        let entity = Offer {
            affiliate_uri: Some("http://partner-ads.com.evil.com/?u={url}".into()),
            ..offer()
        };
        assert_eq!(
            compose(&entity, &config()).as_deref(),
            Some("http://partner-ads.com.evil.com/?u=http%3A%2F%2Fstore.com%2Fproduct")
        );
    }

    #[test]
    fn test_blank_base_returns_unescaped_path() {
        let entity = Offer {
            affiliate_uri: None,
            ..offer()
        };
        assert_eq!(
            compose(&entity, &config()).as_deref(),
            Some("http://store.com/product")
        );

        let entity = Offer {
            affiliate_uri: Some("  ".to_string()),
            ..offer()
        };
        assert_eq!(
            compose(&entity, &config()).as_deref(),
            Some("http://store.com/product")
        );
    }

    #[test]
    fn test_blank_base_ignores_tracking_url() {
        let entity = Offer {
            affiliate_uri: None,
            ..offer()
        };
        let settings = settings().with_tracking_url("http://track.example.com/?url={url}");
        let url =
            compute_redirect_path(&entity, &config(), &settings, &RedirectOverrides::default());
        assert_eq!(url.as_deref(), Some("http://store.com/product"));
    }

    #[test]
    fn test_missing_path_returns_none() {
        let entity = Offer {
            url: None,
            ..offer()
        };
        assert!(compose(&entity, &config()).is_none());

        let entity = Offer {
            url: Some(String::new()),
            ..offer()
        };
        assert!(compose(&entity, &config()).is_none());
    }

    #[test]
    fn test_blank_landing_page_returns_none() {
        let url = compute_redirect_path(
            &offer(),
            &config(),
            &settings(),
            &RedirectOverrides::landing_page(""),
        );
        assert!(url.is_none());
    }

    #[test]
    fn test_literal_epi_keeps_placeholder() {
        let config = RedirectConfig::new(
            Accessor::function(|o: &Offer| o.affiliate_uri.clone()),
            Accessor::field("url"),
        )
        .with_epi(Accessor::literal("{invk_epi}"));

        assert_eq!(
            compose(&offer(), &config).as_deref(),
            Some("http://network.com?url=http%3A%2F%2Fstore.com%2Fproduct&epi={invk_epi}")
        );
    }

    #[test]
    fn test_without_epi_substitutes_empty() {
        let config = RedirectConfig::new(Accessor::field("affiliate_uri"), Accessor::field("url"));
        assert_eq!(
            compose(&offer(), &config).as_deref(),
            Some("http://network.com?url=http%3A%2F%2Fstore.com%2Fproduct&epi=")
        );
    }

    #[test]
    fn test_base_without_epi_token() {
        let entity = Offer {
            affiliate_uri: Some("http://network.com/go?to={url}".to_string()),
            ..offer()
        };
        assert_eq!(
            compose(&entity, &config()).as_deref(),
            Some("http://network.com/go?to=http%3A%2F%2Fstore.com%2Fproduct")
        );
    }

    #[test]
    fn test_tracking_url_wraps_composed_url() {
        let settings = settings().with_tracking_url("http://track.example.com/?url={url}");
        let url =
            compute_redirect_path(&offer(), &config(), &settings, &RedirectOverrides::default());
        assert_eq!(
            url.as_deref(),
            Some(
                "http://track.example.com/?url=http://network.com?url=http%3A%2F%2Fstore.com%2Fproduct&epi=product_foobar"
            )
        );
    }

    #[test]
    fn test_encoded_tracking_url_encodes_composed_url_once() {
        let settings = settings()
            .with_tracking_url("http://track.example.com/?url={url}")
            .with_encoded_tracking_url(true);
        let url =
            compute_redirect_path(&offer(), &config(), &settings, &RedirectOverrides::default());
        assert_eq!(
            url.as_deref(),
            Some(
                "http://track.example.com/?url=http%3A%2F%2Fnetwork.com%3Furl%3Dhttp%253A%252F%252Fstore.com%252Fproduct%26epi%3Dproduct_foobar"
            )
        );
    }

    #[test]
    fn test_encoded_tracking_url_encodes_ignore_listed_inner_url() {
        let entity = Offer {
            affiliate_uri: Some("http://click.affiliator.com?url={url}".to_string()),
            ..offer()
        };
        let settings = settings()
            .with_tracking_url("http://t.example.com/{url}")
            .with_encoded_tracking_url(true);
        let url =
            compute_redirect_path(&entity, &config(), &settings, &RedirectOverrides::default());
        assert_eq!(
            url.as_deref(),
            Some("http://t.example.com/http%3A%2F%2Fclick.affiliator.com%3Furl%3Dhttp%3A%2F%2Fstore.com%2Fproduct")
        );
    }

    #[test]
    fn test_encoded_segment_decodes_to_destination() {
        let entity = Offer {
            url: Some("https://store.com/p?id=1&q=a b/ä#top".to_string()),
            affiliate_uri: Some("http://network.com?url={url}".to_string()),
            ..offer()
        };
        let url = compose(&entity, &config()).unwrap();
        let segment = url.strip_prefix("http://network.com?url=").unwrap();

        assert!(!segment.contains(['&', '?', '/', ' ', '#']));
        assert_eq!(
            urlencoding::decode(segment).unwrap(),
            "https://store.com/p?id=1&q=a b/ä#top"
        );
    }

    #[test]
    fn test_recomputed_on_every_call() {
        let mut entity = offer();
        let config = config();
        let first = compose(&entity, &config);

        entity.url = Some("http://store.com/other".to_string());
        let second = compose(&entity, &config);

        assert_ne!(first, second);
    }
}
