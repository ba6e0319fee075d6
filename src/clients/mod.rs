//! Outbound HTTP clients
//!
//! Both outbound calls (the Slack webhook POST and the SNS subscription
//! confirmation GET) go through one `reqwest::Client` built from the
//! `[http]` configuration section, and sit behind small async traits so the
//! dispatcher can be exercised without a network.

pub mod slack;
pub mod subscription;
pub mod traits;

use reqwest::Client;
use std::time::Duration;

pub use slack::{SlackClient, SlackMessage};
pub use subscription::SnsSubscriptionClient;
pub use traits::{ChatNotifier, SubscriptionConfirmer};

use crate::config::HttpConfig;
use crate::errors::{AppError, AppResult};

/// Build the HTTP client shared by every outbound call
pub fn build_http_client(config: &HttpConfig) -> AppResult<Client> {
    let mut builder = Client::builder()
        .user_agent(&config.user_agent)
        .tcp_keepalive(Duration::from_secs(60))
        .pool_idle_timeout(Duration::from_secs(90));

    if let Some(timeout_secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }

    builder
        .build()
        .map_err(|e| AppError::config_with_source("Failed to create HTTP client", e))
}
