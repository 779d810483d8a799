//! Unit tests for environment configuration

use std::collections::HashMap;
use std::time::Duration;

use coincast::config::{Config, ConfigError, DEFAULT_COINGECKO_API_URL};
use coincast::core::CycleMode;
use coincast::models::Horizon;
use coincast::signals::AttributionPolicy;

fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let env: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = load(&[]).unwrap();
    assert_eq!(config.environment, "sandbox");
    assert!(config.telegram.is_none());
    assert_eq!(config.coingecko.api_url, DEFAULT_COINGECKO_API_URL);
    assert_eq!(config.coingecko.vs_currency, "usd");
    assert_eq!(config.coingecko.retry.max_retries, 3);
    assert_eq!(config.cycle.mode, CycleMode::BestCandidate);
    assert_eq!(config.cycle.top_limit, 10);
    assert_eq!(config.cycle.history_days, 7);
    assert_eq!(config.cycle.attribution, AttributionPolicy::PerHorizon);
    assert!(config.cycle.stablecoins.contains(&"tether".to_string()));
    assert_eq!(config.projection.window(Horizon::EightHours), 48);
    assert_eq!(config.projection.window(Horizon::SevenDays), 336);
    assert_eq!(config.eval_interval_seconds, 0);
    assert_eq!(config.http_port, None);
    assert!(!config.is_production());
}

#[test]
fn test_telegram_settings() {
    let config = load(&[
        ("TELEGRAM_BOT_TOKEN", "123:abc"),
        ("TELEGRAM_CHAT_ID", "42"),
        ("TELEGRAM_API_URL", "http://localhost:9000/"),
        ("POLL_TIMEOUT_SECONDS", "5"),
    ])
    .unwrap();
    let telegram = config.telegram.unwrap();
    assert_eq!(telegram.bot_token, "123:abc");
    assert_eq!(telegram.chat_id, "42");
    assert_eq!(telegram.api_url, "http://localhost:9000");
    assert_eq!(telegram.command, "/projection");
    assert_eq!(telegram.poll_timeout, Duration::from_secs(5));
    assert_eq!(telegram.poll_interval, Duration::from_millis(1000));
}

#[test]
fn test_half_configured_telegram_is_rejected() {
    assert!(matches!(
        load(&[("TELEGRAM_BOT_TOKEN", "123:abc")]),
        Err(ConfigError::Missing("TELEGRAM_CHAT_ID"))
    ));
    assert!(matches!(
        load(&[("TELEGRAM_CHAT_ID", "42"), ("TELEGRAM_BOT_TOKEN", "  ")]),
        Err(ConfigError::Missing("TELEGRAM_BOT_TOKEN"))
    ));
}

#[test]
fn test_cycle_overrides() {
    let config = load(&[
        ("SIGNAL_MODE", "alert"),
        ("WATCHLIST", "Bitcoin, solana,,"),
        ("ATTRIBUTION", "last-improved"),
        ("EVAL_INTERVAL_SECONDS", "3600"),
        ("HTTP_PORT", "8080"),
        ("APP_ENV", "production"),
    ])
    .unwrap();
    assert_eq!(config.cycle.mode, CycleMode::Alert);
    assert_eq!(config.cycle.watchlist, vec!["bitcoin", "solana"]);
    assert_eq!(config.cycle.attribution, AttributionPolicy::LastImproved);
    assert_eq!(config.eval_interval_seconds, 3600);
    assert_eq!(config.http_port, Some(8080));
    assert!(config.is_production());
}

#[test]
fn test_sample_interval_derives_windows() {
    let config = load(&[("SAMPLE_INTERVAL_MINUTES", "60")]).unwrap();
    assert_eq!(config.projection.window(Horizon::EightHours), 8);
    assert_eq!(config.projection.window(Horizon::SevenDays), 168);
}

#[test]
fn test_invalid_values() {
    for (key, value) in [
        ("SIGNAL_MODE", "yolo"),
        ("TOP_ASSETS_LIMIT", "ten"),
        ("SAMPLE_INTERVAL_MINUTES", "0"),
        ("COINGECKO_API_URL", "not a url"),
        ("HTTP_PORT", "70000"),
        ("SAMPLE_INTERVAL_MINUTES", "18446744073709551615"),
    ] {
        match load(&[(key, value)]) {
            Err(ConfigError::Invalid { key: k, value: v, .. }) => {
                assert_eq!(k, key);
                assert_eq!(v, value);
            }
            other => panic!("expected invalid {key}, got {other:?}"),
        }
    }
}
