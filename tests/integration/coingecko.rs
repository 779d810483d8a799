//! Integration tests for the CoinGecko market data provider

use coincast::services::{CoinGeckoClient, MarketDataError, MarketDataProvider, RetryPolicy};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::support::{chart_body, fast_retry, market_entry};

fn client(server: &MockServer, retry: RetryPolicy) -> CoinGeckoClient {
    CoinGeckoClient::with_client(server.uri(), reqwest::Client::new()).with_retry(retry)
}

#[tokio::test]
async fn fetches_price_history() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin/market_chart"))
        .and(query_param("vs_currency", "usd"))
        .and(query_param("days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(5, 42_000.0)))
        .expect(1)
        .mount(&server)
        .await;

    let series = client(&server, RetryPolicy::none())
        .get_price_history("bitcoin", 7)
        .await
        .expect("history");
    assert_eq!(series.len(), 5);
    assert_eq!(series.latest().map(|p| p.price), Some(42_000.0));
}

#[tokio::test]
async fn missing_prices_key_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/ghost/market_chart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "coin not found" })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, fast_retry(3))
        .get_price_history("ghost", 7)
        .await
        .unwrap_err();
    match err {
        MarketDataError::Malformed { context, reason } => {
            assert_eq!(context, "ghost");
            assert!(reason.contains("prices"));
        }
        other => panic!("expected malformed response, got {other:?}"),
    }
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/ethereum/market_chart"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/coins/ethereum/market_chart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chart_body(3, 2_000.0)))
        .expect(1)
        .mount(&server)
        .await;

    let series = client(&server, fast_retry(2))
        .get_price_history("ethereum", 7)
        .await
        .expect("history after retry");
    assert_eq!(series.len(), 3);
}

#[tokio::test]
async fn client_errors_fail_fast() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin/market_chart"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, fast_retry(3))
        .get_price_history("bitcoin", 7)
        .await
        .unwrap_err();
    assert!(matches!(err, MarketDataError::Status { status: 404, .. }));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn rate_limit_exhausts_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin/market_chart"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let err = client(&server, fast_retry(2))
        .get_price_history("bitcoin", 7)
        .await
        .unwrap_err();
    assert!(err.is_transient());
}

#[tokio::test]
async fn fetches_top_assets() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/markets"))
        .and(query_param("vs_currency", "eur"))
        .and(query_param("order", "market_cap_desc"))
        .and(query_param("per_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            market_entry("bitcoin", 1_000_000.0),
            market_entry("ethereum", 500_000.0),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let assets = client(&server, RetryPolicy::none())
        .with_vs_currency("eur")
        .get_top_assets(2)
        .await
        .expect("listing");
    let ids: Vec<&str> = assets.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["bitcoin", "ethereum"]);
    assert_eq!(assets[0].market_cap, Some(1_000_000.0));
}
