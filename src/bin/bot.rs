//! Coincast Bot
//!
//! Listens for the chat command (and, optionally, a cron schedule or HTTP
//! call) and runs one analysis cycle per trigger.

use coincast::config::Config;
use coincast::core::http::{start_server, AppState, HealthStatus};
use coincast::core::{CommandListener, CycleScheduler, SignalCycle, Trigger};
use coincast::logging;
use coincast::metrics::Metrics;
use coincast::projection::ProjectionEngine;
use coincast::services::{CoinGeckoClient, TelegramClient};
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Instant;
use tokio::signal;
use tokio::sync::{mpsc, RwLock};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = Config::from_env()?;
    logging::init_logging(&config.environment);

    info!("Starting Coincast Bot");
    info!(environment = %config.environment, "Environment");

    let telegram_config = config
        .telegram
        .clone()
        .ok_or("TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID are required for the bot")?;

    let metrics = Arc::new(Metrics::new()?);
    let telegram = Arc::new(TelegramClient::new(&telegram_config)?);
    let provider = Arc::new(CoinGeckoClient::new(&config.coingecko)?);

    info!(
        mode = ?config.cycle.mode,
        eight_hours_window = config.projection.window(coincast::models::Horizon::EightHours),
        seven_days_window = config.projection.window(coincast::models::Horizon::SevenDays),
        "Signal cycle configured"
    );
    let cycle = SignalCycle::new(
        provider,
        telegram.clone(),
        ProjectionEngine::new(config.projection),
        config.cycle.clone(),
    )
    .with_metrics(metrics.clone());

    let (trigger_tx, mut trigger_rx) = mpsc::channel::<Trigger>(16);
    let health = Arc::new(RwLock::new(HealthStatus::default()));

    let listener = CommandListener::new(telegram, &telegram_config);
    let listener_handle = tokio::spawn(listener.run(trigger_tx.clone()));

    let scheduler = if config.eval_interval_seconds > 0 {
        let scheduler = CycleScheduler::new(trigger_tx.clone(), config.eval_interval_seconds)?;
        scheduler.start().await;
        Some(scheduler)
    } else {
        None
    };

    let server_handle = config.http_port.map(|port| {
        let state = AppState {
            health: health.clone(),
            metrics: metrics.clone(),
            start_time: Arc::new(Instant::now()),
            triggers: trigger_tx.clone(),
        };
        tokio::spawn(async move {
            if let Err(e) = start_server(port, state).await {
                error!(error = %e, "HTTP server stopped");
            }
        })
    });
    drop(trigger_tx);

    info!("Bot started, waiting for triggers...");
    loop {
        tokio::select! {
            maybe_trigger = trigger_rx.recv() => {
                let Some(trigger) = maybe_trigger else {
                    info!("All trigger sources stopped");
                    break;
                };
                info!(source = %trigger.source, "Running analysis cycle");
                let report = cycle.run().await;
                health.write().await.record_cycle(&report);
                info!(
                    source = %trigger.source,
                    evaluated = report.evaluated,
                    messages = report.messages.len(),
                    "Cycle complete"
                );
            }
            _ = signal::ctrl_c() => {
                info!("Shutting down bot...");
                break;
            }
        }
    }

    if let Some(scheduler) = scheduler {
        scheduler.stop().await;
    }
    listener_handle.abort();
    if let Some(handle) = server_handle {
        handle.abort();
    }
    info!("Bot stopped");

    Ok(())
}
