//! Command line definition
//!
//! Every setting can come from a flag or its environment variable; both win
//! over the optional TOML config file.

use clap::Parser;
use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// Main CLI structure
#[derive(Parser, Debug)]
#[command(name = "aws-sns-slack")]
#[command(about = "Relay Amazon SNS notifications to a Slack incoming webhook")]
#[command(version)]
pub struct Cli {
    /// HTTP listen address, e.g. ":8000" or "127.0.0.1:8000" [default: :8000]
    #[arg(long, env = "HTTP_ADDR")]
    pub http_addr: Option<String>,

    /// URL of a Slack Incoming Webhook integration
    #[arg(long, env = "SLACK_WEBHOOK_URL", hide_env_values = true)]
    pub slack_webhook: Option<String>,

    /// Slack channel to post messages from SNS
    #[arg(long, env = "SLACK_CHANNEL")]
    pub slack_channel: Option<String>,

    /// Post messages to Slack as this user
    #[arg(long, env = "SLACK_USERNAME")]
    pub slack_username: Option<String>,

    /// URL to an image to use as the icon for messages
    #[arg(long, env = "SLACK_ICON_URL")]
    pub slack_icon_url: Option<String>,

    /// Emoji to use as the icon for messages
    #[arg(long, env = "SLACK_ICON_EMOJI")]
    pub slack_icon_emoji: Option<String>,

    /// Timeout in seconds for outbound HTTP calls (none by default)
    #[arg(long, env = "HTTP_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// TOML configuration file
    #[arg(short, long, env = "AWS_SNS_SLACK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            http_addr: self.http_addr.clone(),
            slack_webhook: self.slack_webhook.clone(),
            slack_channel: self.slack_channel.clone(),
            slack_username: self.slack_username.clone(),
            slack_icon_url: self.slack_icon_url.clone(),
            slack_icon_emoji: self.slack_icon_emoji.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}
