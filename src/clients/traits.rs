use async_trait::async_trait;

use crate::errors::AppResult;

/// Delivers formatted notification text to a chat service
#[async_trait]
pub trait ChatNotifier: Send + Sync {
    /// Post one message. Fails with `AppError::Delivery`.
    async fn notify(&self, text: &str) -> AppResult<()>;
}

/// Confirms an SNS topic subscription by visiting its SubscribeURL
#[async_trait]
pub trait SubscriptionConfirmer: Send + Sync {
    /// Fails with `AppError::Confirmation`.
    async fn confirm(&self, subscribe_url: &str) -> AppResult<()>;
}
