//! Cron-based scheduler for periodic analysis cycles

use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, warn};

use crate::core::trigger::{Trigger, TriggerSource};

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("scheduler disabled: interval_seconds is 0")]
    Disabled,
    #[error("interval of {0}s cannot be expressed as an evenly spaced cron schedule")]
    UnevenInterval(u64),
    #[error("invalid cron expression '{expr}': {reason}")]
    InvalidCron { expr: String, reason: String },
}

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Convert an interval to a six-field cron expression
/// (second minute hour day month weekday).
///
/// Cron steps restart at every minute, hour or day boundary, so only
/// intervals that divide the enclosing unit fire at an even pace. Anything
/// else is rejected, as are intervals longer than a day.
pub fn cron_expression(interval_seconds: u64) -> Result<String, SchedulerError> {
    match interval_seconds {
        0 => Err(SchedulerError::Disabled),
        s if s < MINUTE && MINUTE % s == 0 => Ok(format!("*/{s} * * * * *")),
        s if s < HOUR && s % MINUTE == 0 && HOUR % s == 0 => {
            Ok(format!("0 */{} * * * *", s / MINUTE))
        }
        s if s < DAY && s % HOUR == 0 && DAY % s == 0 => Ok(format!("0 0 */{} * * *", s / HOUR)),
        DAY => Ok("0 0 0 * * *".to_string()),
        s => Err(SchedulerError::UnevenInterval(s)),
    }
}

/// Scheduler that periodically pushes a cycle trigger
pub struct CycleScheduler {
    triggers: mpsc::Sender<Trigger>,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl CycleScheduler {
    /// Create a new scheduler
    ///
    /// # Arguments
    /// * `triggers` - Channel the cycle runner consumes
    /// * `interval_seconds` - Cycle interval in seconds (0 = disabled)
    pub fn new(
        triggers: mpsc::Sender<Trigger>,
        interval_seconds: u64,
    ) -> Result<Self, SchedulerError> {
        let cron_expr = cron_expression(interval_seconds)?;
        let schedule = Schedule::from_str(&cron_expr).map_err(|e| SchedulerError::InvalidCron {
            expr: cron_expr.clone(),
            reason: e.to_string(),
        })?;

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            "CycleScheduler: created with interval {}s (cron: {})",
            interval_seconds,
            cron_expr
        );

        Ok(Self {
            triggers,
            schedule,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Start the scheduler
    pub async fn start(&self) {
        let triggers = self.triggers.clone();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("CycleScheduler: started, waiting for cron schedule...");

            loop {
                let mut upcoming = schedule.upcoming(chrono::Utc);
                if let Some(next_tick) = upcoming.next() {
                    let now = chrono::Utc::now();
                    if next_tick > now {
                        let duration = (next_tick - now).to_std().unwrap_or_default();
                        tokio::time::sleep(duration).await;
                    }
                } else {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    continue;
                }

                debug!("CycleScheduler: cron tick");
                if triggers.send(Trigger::now(TriggerSource::Schedule)).await.is_err() {
                    warn!("CycleScheduler: trigger channel closed, stopping");
                    return;
                }
            }
        });

        *self.handle.write().await = Some(handle);
        info!("CycleScheduler: started successfully");
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("CycleScheduler: stopped");
        }
    }

    /// Check if the scheduler is running
    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.is_some()
    }
}
