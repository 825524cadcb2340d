//! Host patterns for destinations whose embedded URL must stay unescaped.

use std::fmt;
use url::Url;

/// Errors raised while parsing a host pattern.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum HostPatternError {
    #[error("Host pattern must not be empty")]
    Empty,

    #[error("Wildcard is only allowed as a leading '*.' in '{0}'")]
    MisplacedWildcard(String),
}

/// A single ignore-encoding host pattern.
///
/// Hosts are case-insensitive: patterns are stored ASCII-lowercased and
/// hosts are lowercased before comparison.
///
/// - `click.affiliator.com` matches exactly that host.
/// - `*.partner-ads.com` matches `partner-ads.com` and any host ending in
///   `.partner-ads.com`, but not `partner-ads.com.evil.com`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostPattern {
    Exact(String),
    Wildcard(String),
}

impl HostPattern {
    /// Parses a pattern, trimming surrounding whitespace and lowercasing it.
    ///
    /// # Errors
    ///
    /// Returns [`HostPatternError::Empty`] for blank input and
    /// [`HostPatternError::MisplacedWildcard`] when `*` appears anywhere
    /// except as a leading `*.` label.
    pub fn parse(input: &str) -> Result<Self, HostPatternError> {
        let pattern = input.trim().to_ascii_lowercase();
        if pattern.is_empty() {
            return Err(HostPatternError::Empty);
        }

        match pattern.strip_prefix("*.") {
            Some(suffix) if !suffix.is_empty() && !suffix.contains('*') => {
                Ok(Self::Wildcard(suffix.to_string()))
            }
            Some(_) => Err(HostPatternError::MisplacedWildcard(pattern.to_string())),
            None if pattern.contains('*') => {
                Err(HostPatternError::MisplacedWildcard(pattern.to_string()))
            }
            None => Ok(Self::Exact(pattern.clone())),
        }
    }

    /// Returns true if `host` satisfies this pattern.
    pub fn matches(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        match self {
            Self::Exact(expected) => host == *expected,
            Self::Wildcard(suffix) => {
                host == *suffix
                    || host
                        .strip_suffix(suffix.as_str())
                        .is_some_and(|prefix| prefix.ends_with('.'))
            }
        }
    }
}

impl fmt::Display for HostPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(host) => write!(f, "{}", host),
            Self::Wildcard(suffix) => write!(f, "*.{}", suffix),
        }
    }
}

/// Ordered set of [`HostPattern`]s.
///
/// Insertion order is kept and duplicates are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreEncodingHosts {
    patterns: Vec<HostPattern>,
}

impl IgnoreEncodingHosts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set from raw pattern strings.
    ///
    /// # Errors
    ///
    /// Fails on the first pattern that does not parse.
    pub fn parse<I, S>(patterns: I) -> Result<Self, HostPatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut hosts = Self::new();
        for pattern in patterns {
            hosts.insert(HostPattern::parse(pattern.as_ref())?);
        }
        Ok(hosts)
    }

    /// Adds a pattern; returns false if it was already present.
    pub fn insert(&mut self, pattern: HostPattern) -> bool {
        if self.patterns.contains(&pattern) {
            return false;
        }
        self.patterns.push(pattern);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HostPattern> {
        self.patterns.iter()
    }

    /// Patterns rendered back to their textual form, in insertion order.
    pub fn patterns(&self) -> Vec<String> {
        self.patterns.iter().map(ToString::to_string).collect()
    }

    /// First pattern matching `host`, if any.
    pub fn find_match(&self, host: &str) -> Option<&HostPattern> {
        self.patterns.iter().find(|pattern| pattern.matches(host))
    }

    /// Returns the matching pattern for the host of `url`.
    ///
    /// URL templates are accepted as-is; a value without a parseable host
    /// never matches.
    pub fn match_url(&self, url: &str) -> Option<&HostPattern> {
        if self.is_empty() {
            return None;
        }
        let host = host_of(url)?;
        self.find_match(&host)
    }
}

/// Extracts the host of an absolute URL or URL template.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url.trim())
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_hosts() -> IgnoreEncodingHosts {
        IgnoreEncodingHosts::parse([
            "click.affiliator.com",
            "track.adtraction.com",
            "*.partner-ads.com",
            "*.smartresponse-media.com",
            "ads.guava-affiliate.com",
        ])
        .unwrap()
    }

    #[test]
    fn test_parse_exact_and_wildcard() {
        assert_eq!(
            HostPattern::parse("click.affiliator.com").unwrap(),
            HostPattern::Exact("click.affiliator.com".to_string())
        );
        assert_eq!(
            HostPattern::parse(" *.partner-ads.com ").unwrap(),
            HostPattern::Wildcard("partner-ads.com".to_string())
        );
    }

    #[test]
    fn test_parse_rejects_bad_patterns() {
        assert_eq!(HostPattern::parse("  "), Err(HostPatternError::Empty));
        assert!(matches!(
            HostPattern::parse("ads.*.com"),
            Err(HostPatternError::MisplacedWildcard(_))
        ));
        assert!(matches!(
            HostPattern::parse("*."),
            Err(HostPatternError::MisplacedWildcard(_))
        ));
        assert!(matches!(
            HostPattern::parse("*.*.com"),
            Err(HostPatternError::MisplacedWildcard(_))
        ));
    }

    #[test]
    fn test_wildcard_matching() {
        let pattern = HostPattern::parse("*.partner-ads.com").unwrap();

        assert!(pattern.matches("sub.partner-ads.com"));
        assert!(pattern.matches("a.b.partner-ads.com"));
        assert!(pattern.matches("partner-ads.com"));
        assert!(!pattern.matches("partner-ads.com.evil.com"));
        assert!(!pattern.matches("evilpartner-ads.com"));
    }

    #[test]
    fn test_exact_matching() {
        let pattern = HostPattern::parse("click.affiliator.com").unwrap();

        assert!(pattern.matches("click.affiliator.com"));
        assert!(!pattern.matches("sub.click.affiliator.com"));
        assert!(!pattern.matches("affiliator.com"));
    }

    #[test]
    fn test_patterns_keep_order_and_drop_duplicates() {
        let mut hosts = fixture_hosts();
        assert!(!hosts.insert(HostPattern::parse("*.partner-ads.com").unwrap()));

        assert_eq!(
            hosts.patterns(),
            vec![
                "click.affiliator.com",
                "track.adtraction.com",
                "*.partner-ads.com",
                "*.smartresponse-media.com",
                "ads.guava-affiliate.com",
            ]
        );
        assert_eq!(hosts.len(), 5);
    }

    #[test]
    fn test_match_url_uses_template_host() {
        let hosts = fixture_hosts();

        let matched = hosts.match_url("http://click.affiliator.com?url={url}&epi={epi}");
        assert_eq!(matched.map(ToString::to_string).as_deref(), Some("click.affiliator.com"));

        let matched = hosts.match_url("https://www.partner-ads.com/click?u={url}");
        assert_eq!(matched.map(ToString::to_string).as_deref(), Some("*.partner-ads.com"));

        assert!(hosts.match_url("http://network.com?url={url}&epi={epi}").is_none());
        assert!(hosts.match_url("not a url {url}").is_none());
    }

    #[test]
    fn test_mixed_case_patterns_and_hosts() {
        let pattern = HostPattern::parse("Click.Affiliator.com").unwrap();
        assert_eq!(pattern, HostPattern::Exact("click.affiliator.com".to_string()));
        assert!(pattern.matches("CLICK.affiliator.COM"));

        let hosts = IgnoreEncodingHosts::parse(["Click.Affiliator.com", "*.Partner-Ads.com"]).unwrap();
        assert!(hosts.match_url("http://Click.Affiliator.com?url={url}").is_some());
        assert!(hosts.match_url("http://click.affiliator.com?url={url}").is_some());
        assert!(hosts.match_url("https://WWW.partner-ads.com/c?u={url}").is_some());
        assert_eq!(hosts.patterns(), vec!["click.affiliator.com", "*.partner-ads.com"]);
    }

    #[test]
    fn test_empty_set_never_matches() {
        assert!(IgnoreEncodingHosts::new().match_url("http://click.affiliator.com").is_none());
    }
}
