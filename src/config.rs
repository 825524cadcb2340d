//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export TRACKING_URL="http://track.example.com/?url={url}"
//! export IGNORE_ENCODING_HOSTS="click.affiliator.com,*.partner-ads.com"
//! export CATALOG_PATH="./catalog.json"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `TRACKING_URL` - Template wrapping every composed URL at `{url}` (default: unset)
//! - `IGNORE_ENCODING_HOSTS` - Comma-separated host patterns whose embedded
//!   destination stays unescaped (default: empty)
//! - `ENCODE_TRACKING_URL` - Percent-encode the composed URL inside the
//!   tracking template (default: `false`)
//! - `CATALOG_PATH` - JSON array of products to serve (default: empty catalog)

use anyhow::{Context, Result};
use std::env;

use crate::domain::{IgnoreEncodingHosts, RedirectorSettings};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Outer tracking template; blank values are treated as unset.
    pub tracking_url: Option<String>,
    /// Raw ignore-encoding host patterns, in configured order.
    pub ignore_encoding_hosts: Vec<String>,
    pub encode_tracking_url: bool,
    pub catalog_path: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Never fails on missing variables; see [`Self::validate`] for checks.
    pub fn from_env() -> Self {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let tracking_url = env::var("TRACKING_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let ignore_encoding_hosts = env::var("IGNORE_ENCODING_HOSTS")
            .map(|v| parse_list(&v))
            .unwrap_or_default();

        let encode_tracking_url = env::var("ENCODE_TRACKING_URL")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let catalog_path = env::var("CATALOG_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty());

        Self {
            listen_addr,
            log_level,
            log_format,
            tracking_url,
            ignore_encoding_hosts,
            encode_tracking_url,
            catalog_path,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `tracking_url` has no `{url}` token
    /// - an ignore-encoding host pattern is malformed
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if let Some(ref tracking_url) = self.tracking_url
            && !tracking_url.contains("{url}")
        {
            anyhow::bail!(
                "TRACKING_URL must contain a '{{url}}' token, got '{}'",
                tracking_url
            );
        }

        IgnoreEncodingHosts::parse(&self.ignore_encoding_hosts)
            .context("IGNORE_ENCODING_HOSTS contains an invalid pattern")?;

        Ok(())
    }

    /// Builds the redirector settings described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an ignore-encoding host pattern is malformed.
    pub fn redirector_settings(&self) -> Result<RedirectorSettings> {
        let hosts = IgnoreEncodingHosts::parse(&self.ignore_encoding_hosts)
            .context("IGNORE_ENCODING_HOSTS contains an invalid pattern")?;

        let mut settings = RedirectorSettings::new()
            .with_ignore_encoding_hosts(hosts)
            .with_encoded_tracking_url(self.encode_tracking_url);
        if let Some(ref tracking_url) = self.tracking_url {
            settings = settings.with_tracking_url(tracking_url.clone());
        }

        Ok(settings)
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);

        match self.tracking_url {
            Some(ref tracking_url) => tracing::info!(
                "  Tracking URL: {} (encoded: {})",
                tracking_url,
                self.encode_tracking_url
            ),
            None => tracing::info!("  Tracking URL: disabled"),
        }

        tracing::info!(
            "  Ignore-encoding hosts: {}",
            if self.ignore_encoding_hosts.is_empty() {
                "none".to_string()
            } else {
                self.ignore_encoding_hosts.join(", ")
            }
        );
        tracing::info!(
            "  Catalog: {}",
            self.catalog_path.as_deref().unwrap_or("empty")
        );
    }
}

/// Splits a comma-separated list, dropping blank entries.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn valid_config() -> Config {
        Config {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            tracking_url: None,
            ignore_encoding_hosts: vec![],
            encode_tracking_url: false,
            catalog_path: None,
        }
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_list(" click.affiliator.com, ,*.partner-ads.com,"),
            vec!["click.affiliator.com", "*.partner-ads.com"]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "0.0.0.0:3000".to_string();

        config.tracking_url = Some("http://track.example.com/".to_string());
        assert!(config.validate().is_err());

        config.tracking_url = Some("http://track.example.com/?url={url}".to_string());
        assert!(config.validate().is_ok());

        config.ignore_encoding_hosts = vec!["ads.*.com".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_redirector_settings() {
        let config = Config {
            tracking_url: Some("http://track.example.com/?url={url}".to_string()),
            ignore_encoding_hosts: vec![
                "click.affiliator.com".to_string(),
                "*.partner-ads.com".to_string(),
            ],
            encode_tracking_url: true,
            ..valid_config()
        };

        let settings = config.redirector_settings().unwrap();
        assert_eq!(
            settings.active_tracking_url(),
            Some("http://track.example.com/?url={url}")
        );
        assert_eq!(
            settings.ignore_encoding_hosts.patterns(),
            vec!["click.affiliator.com", "*.partner-ads.com"]
        );
        assert!(settings.encode_tracking_url);
    }

    #[test]
    #[serial]
    fn test_from_env() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("TRACKING_URL", "http://track.example.com/?url={url}");
            env::set_var(
                "IGNORE_ENCODING_HOSTS",
                "click.affiliator.com,track.adtraction.com,*.partner-ads.com",
            );
            env::set_var("ENCODE_TRACKING_URL", "1");
            env::set_var("CATALOG_PATH", "catalog.json");
        }

        let config = Config::from_env();

        assert_eq!(
            config.tracking_url.as_deref(),
            Some("http://track.example.com/?url={url}")
        );
        assert_eq!(
            config.ignore_encoding_hosts,
            vec![
                "click.affiliator.com",
                "track.adtraction.com",
                "*.partner-ads.com"
            ]
        );
        assert!(config.encode_tracking_url);
        assert_eq!(config.catalog_path.as_deref(), Some("catalog.json"));

        // Cleanup
        unsafe {
            env::remove_var("TRACKING_URL");
            env::remove_var("IGNORE_ENCODING_HOSTS");
            env::remove_var("ENCODE_TRACKING_URL");
            env::remove_var("CATALOG_PATH");
        }
    }

    #[test]
    #[serial]
    fn test_blank_tracking_url_is_unset() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("TRACKING_URL", "  ");
        }

        let config = Config::from_env();
        assert!(config.tracking_url.is_none());
        assert!(!config.encode_tracking_url);

        unsafe {
            env::remove_var("TRACKING_URL");
        }
    }

    #[test]
    #[serial]
    fn test_load_from_env_rejects_tracking_url_without_token() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("TRACKING_URL", "http://track.example.com/");
        }

        let err = load_from_env().unwrap_err();
        assert!(err.to_string().contains("TRACKING_URL"));

        unsafe {
            env::remove_var("TRACKING_URL");
        }
    }
}
