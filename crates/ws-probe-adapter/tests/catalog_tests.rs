/*
[INPUT]:  Builtin endpoint catalog
[OUTPUT]: Test results for catalog contents
[POS]:    Integration tests - catalog
[UPDATE]: When gateways are added or retired
*/

use rstest::rstest;
use tokio_test::assert_ok;
use ws_probe_adapter::{builtin_endpoints, enabled_endpoints};

#[test]
fn test_builtin_catalog_urls_parse() {
    let endpoints = builtin_endpoints();
    assert!(!endpoints.is_empty());

    for endpoint in &endpoints {
        let url = assert_ok!(url::Url::parse(&endpoint.url));
        assert!(
            matches!(url.scheme(), "ws" | "wss"),
            "unexpected scheme for {}",
            endpoint.url
        );
        assert!(url.host_str().is_some(), "missing host in {}", endpoint.url);
    }
}

#[test]
fn test_enabled_subset_preserves_order() {
    let all = builtin_endpoints();
    let enabled = enabled_endpoints();
    assert!(enabled.len() < all.len(), "catalog carries disabled entries");
    assert!(enabled.iter().all(|endpoint| endpoint.enabled));

    let mut last_index = 0;
    for endpoint in &enabled {
        let index = all
            .iter()
            .position(|candidate| candidate.url == endpoint.url)
            .expect("enabled endpoint comes from the catalog");
        assert!(index >= last_index, "order changed at {}", endpoint.url);
        last_index = index;
    }
}

#[rstest]
#[case("Bybit", "wss://stream.bybit.com/realtime")]
#[case("Binance", "wss://stream.binance.com:9443/stream")]
#[case("OKX", "wss://ws.okx.com:8443/ws/v5/public")]
#[case("BitMEX", "wss://ws.bitmex.com/realtime")]
#[case("GMO Coin", "wss://api.coin.z.com/ws/public/v1")]
#[case("Coincheck", "wss://ws-api.coincheck.com/")]
fn test_known_gateways_probed(#[case] exchange: &str, #[case] url: &str) {
    let endpoints = enabled_endpoints();
    assert!(
        endpoints
            .iter()
            .any(|endpoint| endpoint.exchange == exchange && endpoint.url == url),
        "{exchange} gateway missing: {url}"
    );
}

#[test]
fn test_echo_demo_servers_stay_disabled() {
    let endpoints = builtin_endpoints();
    let echo: Vec<_> = endpoints
        .iter()
        .filter(|endpoint| endpoint.exchange == "Echo")
        .collect();
    assert_eq!(echo.len(), 2);
    assert!(echo.iter().all(|endpoint| !endpoint.enabled));
}
