//! Health, metrics and manual-trigger endpoints.

use axum::{
    extract::{MatchedPath, Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, RwLock};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use crate::core::cycle::CycleReport;
use crate::core::trigger::{Trigger, TriggerSource};
use crate::metrics::Metrics;

pub const SERVICE_NAME: &str = "coincast-signal-engine";

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub triggers: mpsc::Sender<Trigger>,
}

/// Outcome of the most recent cycle as reported by `/health`.
#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
    pub last_cycle_at: Option<DateTime<Utc>>,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
            last_cycle_at: None,
        }
    }
}

impl HealthStatus {
    /// `degraded` while the last cycle lost messages or could not fetch any
    /// asset, `healthy` otherwise.
    pub fn record_cycle(&mut self, report: &CycleReport) {
        self.status = if report.is_degraded() {
            "degraded"
        } else {
            "healthy"
        }
        .to_string();
        self.last_cycle_at = Some(Utc::now());
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "last_cycle_at": health.last_cycle_at,
        "service": SERVICE_NAME
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Queue an analysis cycle; it runs after any cycle already in progress.
pub async fn run_now(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.triggers.try_send(Trigger::now(TriggerSource::Http)) {
        Ok(()) => (StatusCode::ACCEPTED, Json(json!({ "status": "queued" }))),
        Err(mpsc::error::TrySendError::Full(_)) => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "status": "busy" })),
        ),
        Err(mpsc::error::TrySendError::Closed(_)) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable" })),
        ),
    }
}

/// Label value for requests that matched no route.
pub const UNMATCHED_ROUTE: &str = "unmatched";

fn method_label(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::HEAD => "HEAD",
        Method::OPTIONS => "OPTIONS",
        _ => "other",
    }
}

/// Counts requests by method, route and status and times them.
///
/// The route label is the matched route template, never the raw URI, so
/// the number of series stays bounded by the router.
async fn track_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = method_label(request.method());
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or(UNMATCHED_ROUTE, MatchedPath::as_str)
        .to_string();
    let path = request.uri().path().to_string();

    let metrics = &state.metrics;
    metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    metrics.http_requests_in_flight.dec();

    let elapsed = started.elapsed();
    let status = response.status();
    metrics
        .http_requests_total
        .with_label_values(&[method, route.as_str(), status.as_str()])
        .inc();
    metrics
        .http_request_duration_seconds
        .observe(elapsed.as_secs_f64());

    if status.is_server_error() {
        warn!(%method, %path, %status, elapsed_ms = elapsed.as_millis() as u64, "request failed");
    }
    response
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/run", post(run_now))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    track_requests,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(port: u16, state: AppState) -> Result<(), std::io::Error> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port, "HTTP server listening");
    axum::serve(listener, app).await
}
