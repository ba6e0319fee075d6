//! SNS-to-Slack dispatch
//!
//! One inbound document in, at most one outbound call out. Notifications are
//! forwarded to the chat webhook, subscription confirmations are confirmed,
//! and every other message type is accepted and dropped.

use std::sync::Arc;
use tracing::{debug, info};

use crate::clients::{ChatNotifier, SubscriptionConfirmer};
use crate::errors::AppResult;
use crate::sns::{MessageType, SnsMessage};

/// What the relay did with a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Notification text was posted to the webhook
    Forwarded,
    /// SubscribeURL was visited
    Confirmed,
    /// No action for this message type
    Ignored(MessageType),
}

/// Decodes SNS messages and routes them to the outbound clients
#[derive(Clone)]
pub struct Relay {
    notifier: Arc<dyn ChatNotifier>,
    confirmer: Arc<dyn SubscriptionConfirmer>,
}

impl Relay {
    pub fn new(notifier: Arc<dyn ChatNotifier>, confirmer: Arc<dyn SubscriptionConfirmer>) -> Self {
        Self {
            notifier,
            confirmer,
        }
    }

    /// Decode a raw request body and dispatch it
    pub async fn handle(&self, body: &[u8]) -> AppResult<RelayOutcome> {
        let message = SnsMessage::from_slice(body)?;
        self.dispatch(&message).await
    }

    pub async fn dispatch(&self, message: &SnsMessage) -> AppResult<RelayOutcome> {
        debug!(
            message_type = %message.message_type,
            message_id = %message.message_id,
            topic_arn = %message.topic_arn,
            "Dispatching SNS message"
        );

        match message.message_type {
            MessageType::Notification => {
                self.notifier.notify(&message.to_string()).await?;
                info!(
                    message_id = %message.message_id,
                    topic_arn = %message.topic_arn,
                    "Forwarded notification to Slack"
                );
                Ok(RelayOutcome::Forwarded)
            }
            MessageType::SubscriptionConfirmation => {
                self.confirmer.confirm(&message.subscribe_url).await?;
                info!(topic_arn = %message.topic_arn, "Confirmed SNS subscription");
                Ok(RelayOutcome::Confirmed)
            }
            other => {
                debug!(message_type = %other, "Ignoring SNS message");
                Ok(RelayOutcome::Ignored(other))
            }
        }
    }
}
