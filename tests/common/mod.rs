#![allow(dead_code)]

use std::sync::Arc;
use redirector::domain::entities::Product;
use redirector::domain::{IgnoreEncodingHosts, RedirectorSettings};
use redirector::infrastructure::persistence::InMemoryProductRepository;
use redirector::server::default_registry;
use redirector::state::AppState;

pub const NETWORK_BASE: &str = "http://network.com?url={url}&epi={epi}";

pub fn ignore_encoding_hosts() -> IgnoreEncodingHosts {
    IgnoreEncodingHosts::parse([
        "click.affiliator.com",
        "track.adtraction.com",
        "*.partner-ads.com",
        "*.smartresponse-media.com",
        "ads.guava-affiliate.com",
    ])
    .unwrap()
}

pub fn test_settings() -> RedirectorSettings {
    RedirectorSettings::new().with_ignore_encoding_hosts(ignore_encoding_hosts())
}

pub fn foobar() -> Product {
    Product::new(1, "foobar")
        .with_url("http://store.com/product")
        .with_affiliate_uri(NETWORK_BASE)
}

pub fn test_products() -> Vec<Product> {
    vec![
        foobar(),
        Product::new(2, "clicker")
            .with_url("http://store.com/product")
            .with_affiliate_uri("http://click.affiliator.com?url={url}&epi={epi}"),
        Product::new(3, "direct").with_url("http://store.com/direct"),
        Product::new(4, "nowhere").with_affiliate_uri(NETWORK_BASE),
    ]
}

pub fn create_test_state_with(settings: RedirectorSettings) -> AppState {
    let repository = InMemoryProductRepository::with_products(test_products()).unwrap();

    AppState::new(Arc::new(default_registry()), Arc::new(settings))
        .with_repository(Arc::new(repository))
}

pub fn create_test_state() -> AppState {
    create_test_state_with(test_settings())
}
