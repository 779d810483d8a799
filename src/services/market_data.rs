//! Market data provider interface.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::PriceSeries;

/// One entry of a market-cap ranked listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAsset {
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub market_cap: Option<f64>,
}

impl MarketAsset {
    pub fn new(id: impl Into<String>, market_cap: f64) -> Self {
        let id = id.into();
        Self {
            symbol: id.clone(),
            name: id.clone(),
            id,
            market_cap: Some(market_cap),
        }
    }
}

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("malformed response for {context}: {reason}")]
    Malformed { context: String, reason: String },
}

impl MarketDataError {
    /// Whether a retry may succeed. Rate limiting and server errors are
    /// transient; a response without price data is not.
    pub fn is_transient(&self) -> bool {
        match self {
            MarketDataError::Transport(_) => true,
            MarketDataError::Status { status, .. } => *status == 429 || *status >= 500,
            MarketDataError::Malformed { .. } => false,
        }
    }
}

impl From<reqwest::Error> for MarketDataError {
    fn from(err: reqwest::Error) -> Self {
        MarketDataError::Transport(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Assets ordered by market capitalization, largest first.
    async fn get_top_assets(&self, limit: usize) -> Result<Vec<MarketAsset>, MarketDataError>;

    /// Price history for the trailing `days`.
    async fn get_price_history(
        &self,
        asset_id: &str,
        days: u32,
    ) -> Result<PriceSeries, MarketDataError>;
}

/// Provider backed by fixed data. Unknown assets yield an empty series.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketDataProvider {
    listing: Vec<MarketAsset>,
    history: HashMap<String, PriceSeries>,
}

impl StaticMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(mut self, listing: Vec<MarketAsset>) -> Self {
        self.listing = listing;
        self
    }

    pub fn with_history(mut self, asset_id: impl Into<String>, series: PriceSeries) -> Self {
        self.history.insert(asset_id.into(), series);
        self
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for StaticMarketDataProvider {
    async fn get_top_assets(&self, limit: usize) -> Result<Vec<MarketAsset>, MarketDataError> {
        Ok(self.listing.iter().take(limit).cloned().collect())
    }

    async fn get_price_history(
        &self,
        asset_id: &str,
        _days: u32,
    ) -> Result<PriceSeries, MarketDataError> {
        Ok(self.history.get(asset_id).cloned().unwrap_or_default())
    }
}
