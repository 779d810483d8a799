//! CoinGecko market data provider implementation

use std::time::Duration;

use backon::Retryable;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::CoinGeckoConfig;
use crate::models::PriceSeries;
use crate::services::market_data::{MarketAsset, MarketDataError, MarketDataProvider};
use crate::services::retry::RetryPolicy;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Option<Vec<(f64, f64)>>,
}

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    base_url: String,
    vs_currency: String,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl CoinGeckoClient {
    pub fn new(config: &CoinGeckoConfig) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("coincast/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(config.api_url.clone(), client)
            .with_vs_currency(config.vs_currency.clone())
            .with_retry(config.retry))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            vs_currency: "usd".to_string(),
            client,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_vs_currency(mut self, vs_currency: impl Into<String>) -> Self {
        self.vs_currency = vs_currency.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn get_body(&self, url: &str, query: &[(&str, String)]) -> Result<String, MarketDataError> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }

    async fn fetch_top_assets(&self, limit: usize) -> Result<Vec<MarketAsset>, MarketDataError> {
        let url = format!("{}/coins/markets", self.base_url);
        let body = self
            .get_body(
                &url,
                &[
                    ("vs_currency", self.vs_currency.clone()),
                    ("order", "market_cap_desc".to_string()),
                    ("per_page", limit.to_string()),
                    ("page", "1".to_string()),
                    ("sparkline", "false".to_string()),
                ],
            )
            .await?;

        serde_json::from_str(&body).map_err(|e| MarketDataError::Malformed {
            context: "coins/markets".to_string(),
            reason: e.to_string(),
        })
    }

    async fn fetch_price_history(
        &self,
        asset_id: &str,
        days: u32,
    ) -> Result<PriceSeries, MarketDataError> {
        let url = format!("{}/coins/{}/market_chart", self.base_url, asset_id);
        let body = self
            .get_body(
                &url,
                &[
                    ("vs_currency", self.vs_currency.clone()),
                    ("days", days.to_string()),
                ],
            )
            .await?;

        let malformed = |reason: String| MarketDataError::Malformed {
            context: asset_id.to_string(),
            reason,
        };
        let chart: MarketChartResponse =
            serde_json::from_str(&body).map_err(|e| malformed(e.to_string()))?;
        let prices = chart
            .prices
            .ok_or_else(|| malformed("key 'prices' not found".to_string()))?;

        let series =
            PriceSeries::from_millis(prices.into_iter().map(|(ts, price)| (ts as i64, price)));
        debug!(asset = %asset_id, points = series.len(), "fetched price history");
        Ok(series)
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for CoinGeckoClient {
    async fn get_top_assets(&self, limit: usize) -> Result<Vec<MarketAsset>, MarketDataError> {
        (|| self.fetch_top_assets(limit))
            .retry(self.retry.backoff())
            .when(MarketDataError::is_transient)
            .notify(|err: &MarketDataError, delay: Duration| {
                warn!(error = %err, delay_ms = delay.as_millis() as u64, "retrying top assets fetch");
            })
            .await
    }

    async fn get_price_history(
        &self,
        asset_id: &str,
        days: u32,
    ) -> Result<PriceSeries, MarketDataError> {
        (|| self.fetch_price_history(asset_id, days))
            .retry(self.retry.backoff())
            .when(MarketDataError::is_transient)
            .notify(|err: &MarketDataError, delay: Duration| {
                warn!(
                    asset = %asset_id,
                    error = %err,
                    delay_ms = delay.as_millis() as u64,
                    "retrying price history fetch"
                );
            })
            .await
    }
}
