//! Command-line companion for the redirector.
//!
//! Composes redirect URLs and inspects host patterns without starting the
//! HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Compose a redirect URL
//! cargo run --bin redirectorctl -- compose \
//!     --base 'http://network.com?url={url}&epi={epi}' \
//!     --path 'http://store.com/product' \
//!     --epi product_foobar
//!
//! # Check which ignore-encoding pattern matches an affiliate URL
//! cargo run --bin redirectorctl -- hosts --check 'http://click.affiliator.com?url={url}'
//!
//! # Print the redirect route for a product
//! cargo run --bin redirectorctl -- route foobar
//! ```
//!
//! # Environment Variables
//!
//! `TRACKING_URL`, `IGNORE_ENCODING_HOSTS` and `ENCODE_TRACKING_URL` are read
//! as defaults; flags override them.

use redirector::config;
use redirector::domain::entities::Product;
use redirector::domain::{
    Accessor, IgnoreEncodingHosts, RedirectConfig, RedirectOverrides, RedirectorSettings,
    compute_redirect_path,
};
use redirector::web::helpers::redirect_route_path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for the redirector.
#[derive(Parser)]
#[command(name = "redirectorctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Compose a redirect URL from explicit values
    Compose {
        /// Affiliate base template with {url} and {epi} tokens
        #[arg(long)]
        base: Option<String>,

        /// Destination URL
        #[arg(long)]
        path: String,

        /// Tracking id
        #[arg(long)]
        epi: Option<String>,

        /// Tracking template wrapping the result at {url}
        #[arg(long)]
        tracking_url: Option<String>,

        /// Ignore-encoding host pattern (repeatable)
        #[arg(long = "ignore-host")]
        ignore_hosts: Vec<String>,

        /// Percent-encode the composed URL inside the tracking template
        #[arg(long)]
        encode_tracking_url: bool,
    },

    /// List configured ignore-encoding hosts
    Hosts {
        /// URL or template whose host should be checked
        #[arg(long)]
        check: Option<String>,
    },

    /// Print the redirect route for a product
    Route {
        /// Product name
        name: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env().context("Invalid redirector configuration")?;

    match cli.command {
        Commands::Compose {
            base,
            path,
            epi,
            tracking_url,
            ignore_hosts,
            encode_tracking_url,
        } => {
            let mut settings = config.redirector_settings()?;
            if let Some(tracking_url) = tracking_url {
                settings = settings.with_tracking_url(tracking_url);
            }
            if !ignore_hosts.is_empty() {
                let hosts = IgnoreEncodingHosts::parse(&ignore_hosts)
                    .context("Invalid --ignore-host pattern")?;
                settings = settings.with_ignore_encoding_hosts(hosts);
            }
            if encode_tracking_url {
                settings = settings.with_encoded_tracking_url(true);
            }

            compose(base, path, epi, &settings);
        }
        Commands::Hosts { check } => {
            let settings = config.redirector_settings()?;
            show_hosts(&settings, check.as_deref());
        }
        Commands::Route { name } => {
            println!("{}", redirect_route_path::<Product>(&name));
        }
    }

    Ok(())
}

/// Composes and prints a redirect URL for ad-hoc values.
fn compose(base: Option<String>, path: String, epi: Option<String>, settings: &RedirectorSettings) {
    let mut product = Product::new(0, "cli").with_url(path);
    if let Some(base) = base {
        product = product.with_affiliate_uri(base);
    }

    let mut config: RedirectConfig<Product> =
        RedirectConfig::new(Accessor::field("affiliate_uri"), Accessor::field("url"));
    if let Some(epi) = epi {
        config = config.with_epi(Accessor::literal(epi));
    }

    match compute_redirect_path(&product, &config, settings, &RedirectOverrides::default()) {
        Some(url) => println!("{}", url.green()),
        None => println!("{}", "No destination URL, nothing to redirect to".yellow()),
    }
}

/// Prints ignore-encoding hosts and optionally tests a URL against them.
fn show_hosts(settings: &RedirectorSettings, check: Option<&str>) {
    let hosts = &settings.ignore_encoding_hosts;

    println!("{}", "Ignore-encoding hosts".bright_blue().bold());
    if hosts.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for pattern in hosts.iter() {
        println!("  {}", pattern);
    }

    if let Some(url) = check {
        println!();
        match hosts.match_url(url) {
            Some(pattern) => println!(
                "{} {} matches {}",
                "✓".green(),
                url,
                pattern.to_string().bold()
            ),
            None => println!(
                "{} {} is not ignore-listed, destination will be percent-encoded",
                "✗".red(),
                url
            ),
        }
    }
}
