//! Integration tests for the HTTP endpoints


use coincast::core::http::UNMATCHED_ROUTE;
use coincast::core::{CycleMode, CycleReport, SkipReason, TriggerSource};
use serde_json::Value;

use test_utils::TestApiServer;

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "coincast-signal-engine");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    app.server.get("/health").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(body.contains(r#"http_requests_total{method="GET",path="/health",status="200"} 1"#));
    assert!(body.contains("cycles_total"));
    assert_eq!(
        app.metrics
            .http_requests_total
            .with_label_values(&["GET", "/health", "200"])
            .get(),
        1
    );
}

#[tokio::test]
async fn run_endpoint_queues_a_cycle() {
    let mut app = TestApiServer::new().await;
    let response = app.server.post("/api/run").await;
    assert_eq!(response.status_code(), 202);

    let body: Value = response.json();
    assert_eq!(body["status"], "queued");

    let trigger = app.triggers.try_recv().expect("trigger queued");
    assert_eq!(trigger.source, TriggerSource::Http);
}

#[tokio::test]
async fn run_endpoint_reports_busy_when_queue_full() {
    let app = TestApiServer::with_capacity(1).await;
    app.server.post("/api/run").await;

    let response = app.server.post("/api/run").expect_failure().await;
    assert_eq!(response.status_code(), 429);
}

#[tokio::test]
async fn run_endpoint_unavailable_after_shutdown() {
    let app = TestApiServer::new().await;
    drop(app.triggers);

    let response = app.server.post("/api/run").expect_failure().await;
    assert_eq!(response.status_code(), 503);
}

#[tokio::test]
async fn unknown_paths_share_one_metric_series() {
    let app = TestApiServer::new().await;
    for i in 0..20 {
        let response = app
            .server
            .get(&format!("/scan/{i}"))
            .expect_failure()
            .await;
        assert_eq!(response.status_code(), 404);
    }

    let body = app.server.get("/metrics").await.text();
    let series: Vec<&str> = body
        .lines()
        .filter(|line| line.starts_with("http_requests_total{") && line.contains("status=\"404\""))
        .collect();
    assert_eq!(series.len(), 1, "{series:?}");
    assert!(series[0].contains(&format!("path=\"{UNMATCHED_ROUTE}\"")));
    assert!(series[0].ends_with(" 20"));
    assert!(!body.contains("/scan/"));
}

#[tokio::test]
async fn health_reflects_last_cycle() {
    let app = TestApiServer::new().await;
    let body: Value = app.server.get("/health").await.json();
    assert!(body["last_cycle_at"].is_null());

    let failed = CycleReport {
        mode: CycleMode::Alert,
        universe_size: 1,
        evaluated: 0,
        skipped: vec![("bitcoin".to_string(), SkipReason::FetchFailed)],
        messages: Vec::new(),
        delivery_failures: 0,
    };
    app.health.write().await.record_cycle(&failed);

    let body: Value = app.server.get("/health").await.json();
    assert_eq!(body["status"], "degraded");
    assert!(body["last_cycle_at"].is_string());

    let recovered = CycleReport {
        evaluated: 1,
        skipped: Vec::new(),
        ..failed
    };
    app.health.write().await.record_cycle(&recovered);

    let body: Value = app.server.get("/health").await.json();
    assert_eq!(body["status"], "healthy");
}
