use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use super::traits::ChatNotifier;
use crate::config::SlackConfig;
use crate::errors::{AppError, AppResult};

/// Form field the incoming webhook reads the JSON document from
pub const PAYLOAD_FIELD: &str = "payload";

/// A message for a Slack incoming webhook.
///
/// Presentation fields that are unset or empty are left out of the JSON so the
/// webhook's own defaults apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SlackMessage {
    #[serde(skip_serializing_if = "is_blank")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub icon_emoji: Option<String>,
    pub text: String,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

impl SlackMessage {
    /// Build a message carrying `text`, presented as configured
    pub fn new(text: impl Into<String>, config: &SlackConfig) -> Self {
        Self {
            channel: config.channel.clone(),
            username: config.username.clone(),
            icon_url: config.icon_url.clone(),
            icon_emoji: config.icon_emoji.clone(),
            text: text.into(),
        }
    }

    pub fn to_json(&self) -> AppResult<String> {
        serde_json::to_string(self)
            .map_err(|e| AppError::delivery_with_source("failed to serialize Slack payload", e))
    }
}

/// Posts messages to a Slack incoming webhook
#[derive(Clone)]
pub struct SlackClient {
    client: Client,
    config: SlackConfig,
}

impl SlackClient {
    pub fn new(client: Client, config: SlackConfig) -> Self {
        Self { client, config }
    }

    /// Send `message` as `payload=<url-encoded JSON>`
    pub async fn post_message(&self, message: &SlackMessage) -> AppResult<()> {
        let payload = message.to_json()?;

        let response = self
            .client
            .post(&self.config.webhook_url)
            .form(&[(PAYLOAD_FIELD, payload.as_str())])
            .send()
            .await
            .map_err(|e| AppError::delivery_with_source("request to webhook failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::delivery(format!(
                "webhook responded with {} - {}",
                status,
                error_text.trim()
            )));
        }

        debug!(status = %status, "Slack webhook accepted message");
        Ok(())
    }
}

#[async_trait]
impl ChatNotifier for SlackClient {
    async fn notify(&self, text: &str) -> AppResult<()> {
        let message = SlackMessage::new(text, &self.config);
        self.post_message(&message).await
    }
}
