//! One analysis cycle: resolve the universe, project every candidate, emit
//! messages.
//!
//! Assets are processed sequentially. The only state shared across assets is
//! the ranking accumulator in best-candidate mode.

use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::indicators::compute_indicators;
use crate::metrics::Metrics;
use crate::models::Projection;
use crate::projection::ProjectionEngine;
use crate::services::market_data::MarketDataProvider;
use crate::services::notifier::NotificationSink;
use crate::signals::{
    ranking_score, render_best_candidate, AttributionPolicy, RankingSelector,
    SignalDecisionEngine,
};
use crate::universe::AssetUniverse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleMode {
    /// Buy/sell alerts for every watchlist asset.
    Alert,
    /// One summary naming the best asset among the top market caps.
    BestCandidate,
}

impl FromStr for CycleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alert" | "alerts" => Ok(CycleMode::Alert),
            "best" | "best-candidate" | "best_candidate" => Ok(CycleMode::BestCandidate),
            other => Err(format!("unknown signal mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CycleSettings {
    pub mode: CycleMode,
    pub watchlist: Vec<String>,
    pub stablecoins: Vec<String>,
    pub top_limit: usize,
    pub history_days: u32,
    pub attribution: AttributionPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Empty or missing price history.
    NoData,
    /// The data source kept failing after retries.
    FetchFailed,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NoData => "no_data",
            SkipReason::FetchFailed => "fetch_failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    pub mode: CycleMode,
    pub universe_size: usize,
    pub evaluated: usize,
    pub skipped: Vec<(String, SkipReason)>,
    pub messages: Vec<String>,
    pub delivery_failures: usize,
}

impl CycleReport {
    fn new(mode: CycleMode, universe_size: usize) -> Self {
        Self {
            mode,
            universe_size,
            evaluated: 0,
            skipped: Vec::new(),
            messages: Vec::new(),
            delivery_failures: 0,
        }
    }

    /// Some message was not delivered, or every candidate failed to fetch.
    pub fn is_degraded(&self) -> bool {
        let all_fetches_failed = !self.skipped.is_empty()
            && self.evaluated == 0
            && self
                .skipped
                .iter()
                .all(|(_, reason)| *reason == SkipReason::FetchFailed);
        self.delivery_failures > 0 || all_fetches_failed
    }
}

pub struct SignalCycle {
    provider: Arc<dyn MarketDataProvider>,
    sink: Arc<dyn NotificationSink>,
    engine: ProjectionEngine,
    settings: CycleSettings,
    metrics: Option<Arc<Metrics>>,
}

impl SignalCycle {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        sink: Arc<dyn NotificationSink>,
        engine: ProjectionEngine,
        settings: CycleSettings,
    ) -> Self {
        Self {
            provider,
            sink,
            engine,
            settings,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Run to completion over a freshly resolved universe. Never fails:
    /// data gaps skip the asset, delivery failures are counted.
    pub async fn run(&self) -> CycleReport {
        let universe = self.resolve_universe().await;
        info!(
            mode = ?self.settings.mode,
            assets = universe.len(),
            "starting analysis cycle"
        );

        let report = match self.settings.mode {
            CycleMode::Alert => self.run_alerts(&universe).await,
            CycleMode::BestCandidate => self.run_best_candidate(&universe).await,
        };

        if let Some(metrics) = &self.metrics {
            metrics.cycles_total.inc();
        }
        info!(
            evaluated = report.evaluated,
            skipped = report.skipped.len(),
            messages = report.messages.len(),
            delivery_failures = report.delivery_failures,
            "analysis cycle finished"
        );
        report
    }

    pub async fn resolve_universe(&self) -> AssetUniverse {
        match self.settings.mode {
            CycleMode::Alert => AssetUniverse::watchlist(self.settings.watchlist.iter().cloned())
                .excluding(&self.settings.stablecoins),
            CycleMode::BestCandidate => {
                match self.provider.get_top_assets(self.settings.top_limit).await {
                    Ok(listed) => AssetUniverse::top_by_market_cap(
                        listed,
                        self.settings.top_limit,
                        &self.settings.stablecoins,
                    ),
                    Err(e) => {
                        warn!(error = %e, "failed to fetch top assets; cycle has no candidates");
                        AssetUniverse::default()
                    }
                }
            }
        }
    }

    pub async fn run_alerts(&self, universe: &AssetUniverse) -> CycleReport {
        let mut report = CycleReport::new(CycleMode::Alert, universe.len());

        for asset in universe.candidates() {
            let projection = match self.load_projection(asset).await {
                Ok(projection) => projection,
                Err(reason) => {
                    self.record_skip(&mut report, asset, reason);
                    continue;
                }
            };
            report.evaluated += 1;

            for recommendation in SignalDecisionEngine::alerts(asset, &projection) {
                info!(
                    asset = %asset,
                    horizon = %recommendation.horizon,
                    direction = recommendation.direction.as_str(),
                    percentage = recommendation.percentage,
                    "alert generated"
                );
                self.count_signal(recommendation.direction.as_str());
                self.deliver(&mut report, recommendation.message).await;
            }
        }
        report
    }

    pub async fn run_best_candidate(&self, universe: &AssetUniverse) -> CycleReport {
        let mut report = CycleReport::new(CycleMode::BestCandidate, universe.len());
        let selector = RankingSelector::new(self.settings.attribution);
        let mut ranking = selector.accumulator();

        for asset in universe.candidates() {
            match self.load_projection(asset).await {
                Ok(projection) => {
                    report.evaluated += 1;
                    let score = ranking_score(Some(&projection));
                    debug!(
                        asset = %asset,
                        score_8h = score.eight_hours,
                        score_7d = score.seven_days,
                        "ranked asset"
                    );
                    ranking.observe(asset, score);
                }
                Err(reason) => self.record_skip(&mut report, asset, reason),
            }
        }

        match ranking.finish() {
            Some(selection) => {
                info!(
                    best = %selection.best_asset,
                    best_8h_pct = ?selection.best_8h_pct,
                    best_7d_pct = ?selection.best_7d_pct,
                    "best candidate selected"
                );
                self.count_signal("best_candidate");
                let message = render_best_candidate(&selection, selector.policy());
                self.deliver(&mut report, message).await;
            }
            None => info!("no asset produced a usable score"),
        }
        report
    }

    async fn load_projection(&self, asset: &str) -> Result<Projection, SkipReason> {
        let series = self
            .provider
            .get_price_history(asset, self.settings.history_days)
            .await
            .map_err(|e| {
                warn!(asset = %asset, error = %e, "price history unavailable");
                SkipReason::FetchFailed
            })?;

        let frame = compute_indicators(&series);
        if let Some(latest) = frame.latest() {
            debug!(
                asset = %asset,
                points = frame.len(),
                price = latest.price,
                sma_20 = ?latest.sma_20,
                macd = ?latest.macd,
                macd_signal = ?latest.macd_signal,
                rsi = ?latest.rsi,
                "indicators computed"
            );
        }

        let projection = self.engine.project(&frame).ok_or_else(|| {
            info!(asset = %asset, "no data available");
            SkipReason::NoData
        })?;
        if let Some(metrics) = &self.metrics {
            metrics.assets_evaluated_total.inc();
        }
        Ok(projection)
    }

    fn record_skip(&self, report: &mut CycleReport, asset: &str, reason: SkipReason) {
        if let Some(metrics) = &self.metrics {
            metrics
                .assets_skipped_total
                .with_label_values(&[reason.as_str()])
                .inc();
        }
        report.skipped.push((asset.to_string(), reason));
    }

    fn count_signal(&self, kind: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.signals_emitted_total.with_label_values(&[kind]).inc();
        }
    }

    async fn deliver(&self, report: &mut CycleReport, message: String) {
        if let Err(e) = self.sink.deliver(&message).await {
            warn!(error = %e, "failed to deliver message");
            report.delivery_failures += 1;
            if let Some(metrics) = &self.metrics {
                metrics.notifications_failed_total.inc();
            }
        }
        report.messages.push(message);
    }
}
