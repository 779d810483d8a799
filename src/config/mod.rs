//! Environment-driven configuration.
//!
//! Everything is read once at startup into an immutable [`Config`] that is
//! handed to the adapters when they are constructed. The analysis core
//! itself takes no configuration beyond [`ProjectionParams`].

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::core::cycle::{CycleMode, CycleSettings};
use crate::projection::ProjectionParams;
use crate::services::retry::RetryPolicy;
use crate::signals::AttributionPolicy;
use crate::universe::{DEFAULT_STABLECOINS, DEFAULT_TOP_LIMIT, DEFAULT_WATCHLIST};

pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_COMMAND: &str = "/projection";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelegramConfig {
    pub api_url: String,
    pub bot_token: String,
    pub chat_id: String,
    pub command: String,
    pub poll_timeout: Duration,
    pub poll_interval: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoinGeckoConfig {
    pub api_url: String,
    pub vs_currency: String,
    pub retry: RetryPolicy,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    /// Absent when no bot token / chat id is configured.
    pub telegram: Option<TelegramConfig>,
    pub coingecko: CoinGeckoConfig,
    pub cycle: CycleSettings,
    pub projection: ProjectionParams,
    /// 0 disables the periodic scheduler.
    pub eval_interval_seconds: u64,
    pub http_port: Option<u16>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let telegram = match (get("TELEGRAM_BOT_TOKEN"), get("TELEGRAM_CHAT_ID")) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramConfig {
                api_url: parse_url(
                    "TELEGRAM_API_URL",
                    get("TELEGRAM_API_URL").unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.into()),
                )?,
                bot_token,
                chat_id,
                command: get("COMMAND").unwrap_or_else(|| DEFAULT_COMMAND.into()),
                poll_timeout: Duration::from_secs(parse_or("POLL_TIMEOUT_SECONDS", get("POLL_TIMEOUT_SECONDS"), 100)?),
                poll_interval: Duration::from_millis(parse_or("POLL_INTERVAL_MS", get("POLL_INTERVAL_MS"), 1000)?),
            }),
            (Some(_), None) => return Err(ConfigError::Missing("TELEGRAM_CHAT_ID")),
            (None, Some(_)) => return Err(ConfigError::Missing("TELEGRAM_BOT_TOKEN")),
            (None, None) => None,
        };

        let coingecko = CoinGeckoConfig {
            api_url: parse_url(
                "COINGECKO_API_URL",
                get("COINGECKO_API_URL").unwrap_or_else(|| DEFAULT_COINGECKO_API_URL.into()),
            )?,
            vs_currency: get("VS_CURRENCY").unwrap_or_else(|| "usd".into()),
            retry: RetryPolicy {
                max_retries: parse_or("FETCH_MAX_RETRIES", get("FETCH_MAX_RETRIES"), 3)?,
                ..RetryPolicy::default()
            },
        };

        let mode = match get("SIGNAL_MODE") {
            Some(raw) => CycleMode::from_str(&raw).map_err(|reason| ConfigError::Invalid {
                key: "SIGNAL_MODE",
                value: raw,
                reason,
            })?,
            None => CycleMode::BestCandidate,
        };
        let attribution = match get("ATTRIBUTION") {
            Some(raw) => AttributionPolicy::from_str(&raw).map_err(|reason| ConfigError::Invalid {
                key: "ATTRIBUTION",
                value: raw,
                reason,
            })?,
            None => AttributionPolicy::default(),
        };

        let cycle = CycleSettings {
            mode,
            watchlist: list_or(get("WATCHLIST"), DEFAULT_WATCHLIST),
            stablecoins: list_or(get("STABLECOINS"), DEFAULT_STABLECOINS),
            top_limit: parse_or("TOP_ASSETS_LIMIT", get("TOP_ASSETS_LIMIT"), DEFAULT_TOP_LIMIT)?,
            history_days: parse_or("HISTORY_DAYS", get("HISTORY_DAYS"), 7)?,
            attribution,
        };

        let projection = match get("SAMPLE_INTERVAL_MINUTES") {
            Some(raw) => {
                let minutes: u64 = parse_or("SAMPLE_INTERVAL_MINUTES", Some(raw.clone()), 0)?;
                let invalid = |reason: String| ConfigError::Invalid {
                    key: "SAMPLE_INTERVAL_MINUTES",
                    value: raw.clone(),
                    reason,
                };
                let seconds = minutes
                    .checked_mul(60)
                    .ok_or_else(|| invalid("interval overflows".to_string()))?;
                ProjectionParams::for_cadence(Duration::from_secs(seconds))
                    .map_err(|e| invalid(e.to_string()))?
            }
            None => ProjectionParams::default(),
        };

        let http_port = match get("HTTP_PORT") {
            Some(raw) => Some(parse_or("HTTP_PORT", Some(raw), 0u16)?),
            None => None,
        };

        Ok(Self {
            environment: get("APP_ENV").unwrap_or_else(|| "sandbox".into()),
            telegram,
            coingecko,
            cycle,
            projection,
            eval_interval_seconds: parse_or("EVAL_INTERVAL_SECONDS", get("EVAL_INTERVAL_SECONDS"), 0)?,
            http_port,
        })
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "production" | "prod")
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

fn parse_url(key: &'static str, raw: String) -> Result<String, ConfigError> {
    Url::parse(&raw).map_err(|e| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })?;
    Ok(raw.trim_end_matches('/').to_string())
}

fn list_or(raw: Option<String>, default: &[&str]) -> Vec<String> {
    match raw {
        Some(value) => value
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect(),
        None => default.iter().map(|s| s.to_string()).collect(),
    }
}
