//! aws-sns-slack
//!
//! Receives Amazon SNS HTTP(S) deliveries, forwards notifications to a Slack
//! incoming webhook and confirms topic subscriptions automatically.

pub mod cli;
pub mod clients;
pub mod config;
pub mod errors;
pub mod relay;
pub mod server;
pub mod sns;

// Re-export commonly used types for convenience
pub use config::{Config, SlackConfig};
pub use errors::{AppError, AppResult};
pub use relay::{Relay, RelayOutcome};
pub use sns::{MessageType, SnsMessage};
