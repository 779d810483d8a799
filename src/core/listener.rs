//! Long-poll loop turning chat commands into cycle triggers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::TelegramConfig;
use crate::core::trigger::{Trigger, TriggerSource};
use crate::services::telegram::{TelegramClient, TelegramError, Update};

pub struct CommandListener {
    client: Arc<TelegramClient>,
    command: String,
    chat_id: String,
    poll_interval: Duration,
    offset: Option<i64>,
}

impl CommandListener {
    pub fn new(client: Arc<TelegramClient>, config: &TelegramConfig) -> Self {
        Self {
            client,
            command: config.command.clone(),
            chat_id: config.chat_id.clone(),
            poll_interval: config.poll_interval,
            offset: None,
        }
    }

    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// Whether an update is the configured command sent from the configured chat.
    pub fn is_trigger(&self, update: &Update) -> bool {
        let text_matches = update.text().map(str::trim) == Some(self.command.as_str());
        let chat_matches = update
            .chat_id()
            .is_some_and(|id| id.to_string() == self.chat_id);
        text_matches && chat_matches
    }

    /// Fetch one batch of updates, advance the offset past it, and return
    /// a trigger for each matching command.
    pub async fn poll_once(&mut self) -> Result<Vec<Trigger>, TelegramError> {
        let updates = self.client.get_updates(self.offset).await?;
        if let Some(last) = updates.last() {
            self.offset = Some(last.update_id + 1);
        }
        debug!(count = updates.len(), offset = ?self.offset, "received updates");

        Ok(updates
            .iter()
            .filter(|update| self.is_trigger(update))
            .map(|_| Trigger::now(TriggerSource::Command))
            .collect())
    }

    /// Poll until the trigger channel closes.
    pub async fn run(mut self, triggers: mpsc::Sender<Trigger>) {
        info!(command = %self.command, "command listener started");
        loop {
            match self.poll_once().await {
                Ok(found) => {
                    for trigger in found {
                        info!(command = %self.command, "command received");
                        if triggers.send(trigger).await.is_err() {
                            info!("trigger channel closed, stopping command listener");
                            return;
                        }
                    }
                }
                Err(e) => warn!(error = %e, "failed to fetch updates"),
            }
            if triggers.is_closed() {
                return;
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
