//! Run a single analysis cycle and exit.
//!
//! Messages go to Telegram when a bot token and chat id are configured,
//! otherwise they are written to the log.

use coincast::config::Config;
use coincast::core::SignalCycle;
use coincast::logging;
use coincast::projection::ProjectionEngine;
use coincast::services::notifier::{LogSink, NotificationSink};
use coincast::services::{CoinGeckoClient, TelegramClient};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = Config::from_env()?;
    logging::init_logging(&config.environment);

    let sink: Arc<dyn NotificationSink> = match &config.telegram {
        Some(telegram) => Arc::new(TelegramClient::new(telegram)?),
        None => {
            info!("No Telegram credentials configured, logging messages instead");
            Arc::new(LogSink)
        }
    };
    let provider = Arc::new(CoinGeckoClient::new(&config.coingecko)?);

    let cycle = SignalCycle::new(
        provider,
        sink,
        ProjectionEngine::new(config.projection),
        config.cycle.clone(),
    );
    let report = cycle.run().await;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
