//! Telegram Bot API client: message delivery and update polling.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::TelegramConfig;
use crate::services::notifier::{NotificationSink, NotifyError};

/// Slack added on top of the long-poll timeout before the HTTP request
/// itself is abandoned.
const REQUEST_TIMEOUT_SLACK: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("api error: {0}")]
    Api(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        TelegramError::Transport(err.to_string())
    }
}

impl From<TelegramError> for NotifyError {
    fn from(err: TelegramError) -> Self {
        match err {
            TelegramError::Transport(e) => NotifyError::Transport(e),
            other => NotifyError::Rejected(other.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub text: Option<String>,
    pub chat: Chat,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Chat {
    pub id: i64,
}

impl Update {
    pub fn text(&self) -> Option<&str> {
        self.message.as_ref()?.text.as_deref()
    }

    pub fn chat_id(&self) -> Option<i64> {
        self.message.as_ref().map(|m| m.chat.id)
    }
}

#[derive(Debug, Clone)]
pub struct TelegramClient {
    bot_url: String,
    chat_id: String,
    poll_timeout: Duration,
    client: reqwest::Client,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig) -> Result<Self, TelegramError> {
        let client = reqwest::Client::builder()
            .timeout(config.poll_timeout + REQUEST_TIMEOUT_SLACK)
            .build()?;
        Ok(Self::with_client(
            &config.api_url,
            &config.bot_token,
            config.chat_id.clone(),
            client,
        )
        .with_poll_timeout(config.poll_timeout))
    }

    pub fn with_client(
        api_url: &str,
        bot_token: &str,
        chat_id: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            bot_url: format!("{}/bot{}", api_url.trim_end_matches('/'), bot_token),
            chat_id: chat_id.into(),
            poll_timeout: Duration::from_secs(100),
            client,
        }
    }

    pub fn with_poll_timeout(mut self, poll_timeout: Duration) -> Self {
        self.poll_timeout = poll_timeout;
        self
    }

    pub async fn send_message(&self, text: &str) -> Result<(), TelegramError> {
        let url = format!("{}/sendMessage", self.bot_url);
        let request = self
            .client
            .get(&url)
            .query(&[("chat_id", self.chat_id.as_str()), ("text", text)]);
        let _: serde_json::Value = Self::call(request).await?;
        debug!(chat_id = %self.chat_id, "message delivered");
        Ok(())
    }

    /// Long-poll for updates newer than `offset`.
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, TelegramError> {
        let url = format!("{}/getUpdates", self.bot_url);
        let mut query = vec![("timeout", self.poll_timeout.as_secs().to_string())];
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }
        Self::call(self.client.get(&url).query(&query)).await
    }

    async fn call<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, TelegramError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        // Telegram reports errors with a JSON body and a non-2xx status;
        // prefer its description when present.
        let parsed: Result<ApiResponse<T>, _> = serde_json::from_str(&body);
        match parsed {
            Ok(api) if api.ok => api
                .result
                .ok_or_else(|| TelegramError::Malformed("missing result".to_string())),
            Ok(api) => Err(TelegramError::Api(
                api.description.unwrap_or_else(|| format!("status {}", status.as_u16())),
            )),
            Err(_) if !status.is_success() => Err(TelegramError::Status(status.as_u16())),
            Err(e) => Err(TelegramError::Malformed(e.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl NotificationSink for TelegramClient {
    async fn deliver(&self, message: &str) -> Result<(), NotifyError> {
        Ok(self.send_message(message).await?)
    }
}
