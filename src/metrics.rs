//! Prometheus metrics for cycles, signals and the HTTP endpoint.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub cycles_total: IntCounter,
    pub assets_evaluated_total: IntCounter,
    pub assets_skipped_total: IntCounterVec,
    pub signals_emitted_total: IntCounterVec,
    pub notifications_failed_total: IntCounter,
    pub http_requests_total: IntCounterVec,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let cycles_total = IntCounter::new("cycles_total", "Analysis cycles completed")?;
        let assets_evaluated_total =
            IntCounter::new("assets_evaluated_total", "Assets that produced a projection")?;
        let assets_skipped_total = IntCounterVec::new(
            Opts::new("assets_skipped_total", "Assets skipped during a cycle"),
            &["reason"],
        )?;
        let signals_emitted_total = IntCounterVec::new(
            Opts::new("signals_emitted_total", "Signal messages produced"),
            &["kind"],
        )?;
        let notifications_failed_total = IntCounter::new(
            "notifications_failed_total",
            "Messages the notification sink failed to deliver",
        )?;
        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "HTTP requests served"),
            &["method", "path", "status"],
        )?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency",
        ))?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently being served")?;

        registry.register(Box::new(cycles_total.clone()))?;
        registry.register(Box::new(assets_evaluated_total.clone()))?;
        registry.register(Box::new(assets_skipped_total.clone()))?;
        registry.register(Box::new(signals_emitted_total.clone()))?;
        registry.register(Box::new(notifications_failed_total.clone()))?;
        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;

        Ok(Self {
            registry,
            cycles_total,
            assets_evaluated_total,
            assets_skipped_total,
            signals_emitted_total,
            notifications_failed_total,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
        })
    }

    /// Render all registered metrics in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
