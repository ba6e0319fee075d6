use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::traits::SubscriptionConfirmer;
use crate::errors::{AppError, AppResult};

/// Confirms SNS subscriptions with a plain GET to the SubscribeURL
#[derive(Clone)]
pub struct SnsSubscriptionClient {
    client: Client,
}

impl SnsSubscriptionClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SubscriptionConfirmer for SnsSubscriptionClient {
    async fn confirm(&self, subscribe_url: &str) -> AppResult<()> {
        if subscribe_url.is_empty() {
            return Err(AppError::confirmation(
                subscribe_url,
                "message has no SubscribeURL",
            ));
        }
        let url = Url::parse(subscribe_url).map_err(|e| {
            AppError::confirmation_with_source(subscribe_url, "invalid SubscribeURL", e)
        })?;

        let response = self.client.get(url).send().await.map_err(|e| {
            AppError::confirmation_with_source(subscribe_url, "request failed", e)
        })?;

        // Body is the ConfirmSubscriptionResponse XML; only the status matters
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::confirmation(
                subscribe_url,
                format!("endpoint responded with {}", status),
            ));
        }

        debug!(status = %status, "Subscription confirmation accepted");
        Ok(())
    }
}
