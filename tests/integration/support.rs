//! Shared helpers for integration tests
#![allow(dead_code)]

use std::time::Duration;

use coincast::config::TelegramConfig;
use coincast::services::RetryPolicy;
use serde_json::{json, Value};

pub const BOT_TOKEN: &str = "TEST";
pub const CHAT_ID: &str = "42";

/// `market_chart` body with `len` five-minute samples at a constant price.
pub fn chart_body(len: usize, price: f64) -> Value {
    let start_ms: i64 = 1_704_067_200_000;
    let prices: Vec<Value> = (0..len as i64)
        .map(|i| json!([start_ms + i * 300_000, price]))
        .collect();
    json!({ "prices": prices, "market_caps": [], "total_volumes": [] })
}

pub fn market_entry(id: &str, market_cap: f64) -> Value {
    json!({
        "id": id,
        "symbol": &id[..3.min(id.len())],
        "name": id,
        "current_price": 1.0,
        "market_cap": market_cap
    })
}

pub fn fast_retry(max_retries: usize) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        min_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(5),
    }
}

pub fn telegram_config(api_url: &str) -> TelegramConfig {
    TelegramConfig {
        api_url: api_url.to_string(),
        bot_token: BOT_TOKEN.to_string(),
        chat_id: CHAT_ID.to_string(),
        command: "/projection".to_string(),
        poll_timeout: Duration::ZERO,
        poll_interval: Duration::from_millis(10),
    }
}

pub fn bot_path(method: &str) -> String {
    format!("/bot{BOT_TOKEN}/{method}")
}
