use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use url::Url;

/// Default HTTP listen address, all interfaces on port 8000
pub const DEFAULT_HTTP_ADDR: &str = ":8000";

/// Main configuration structure for the relay
///
/// Loaded once at startup and shared read-only by every request handler.
/// Values come from an optional TOML file, then flags and environment
/// variables layered on top (see [`ConfigOverrides`]).
///
/// # Example
///
/// ```toml
/// [server]
/// http_addr = "127.0.0.1:8000"
///
/// [slack]
/// webhook_url = "https://hooks.slack.com/services/T000/B000/XXXX"
/// channel = "#alerts"
/// icon_emoji = ":amazon:"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub slack: SlackConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub http_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
        }
    }
}

/// Slack incoming webhook destination and message presentation
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SlackConfig {
    pub webhook_url: String,
    pub channel: Option<String>,
    pub username: Option<String>,
    pub icon_url: Option<String>,
    pub icon_emoji: Option<String>,
}

/// Settings for the outbound HTTP client shared by the webhook and
/// subscription confirmation calls
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// No timeout when unset; a slow endpoint only stalls its own request
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Values supplied on the command line or through the environment.
/// Anything set here wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub http_addr: Option<String>,
    pub slack_webhook: Option<String>,
    pub slack_channel: Option<String>,
    pub slack_username: Option<String>,
    pub slack_icon_url: Option<String>,
    pub slack_icon_emoji: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from `path` when given, defaults otherwise
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::io_with_source(path, "read config file", e))?;
        Ok(toml::from_str(&content)?)
    }

    /// Layer flag / environment values over the loaded configuration
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(addr) = non_empty(overrides.http_addr) {
            self.server.http_addr = addr;
        }
        if let Some(webhook) = non_empty(overrides.slack_webhook) {
            self.slack.webhook_url = webhook;
        }
        if let Some(channel) = non_empty(overrides.slack_channel) {
            self.slack.channel = Some(channel);
        }
        if let Some(username) = non_empty(overrides.slack_username) {
            self.slack.username = Some(username);
        }
        if let Some(icon_url) = non_empty(overrides.slack_icon_url) {
            self.slack.icon_url = Some(icon_url);
        }
        if let Some(icon_emoji) = non_empty(overrides.slack_icon_emoji) {
            self.slack.icon_emoji = Some(icon_emoji);
        }
        if overrides.timeout_secs.is_some() {
            self.http.timeout_secs = overrides.timeout_secs;
        }
    }

    /// Reject configurations the relay cannot start with
    pub fn validate(&self) -> AppResult<()> {
        if self.slack.webhook_url.trim().is_empty() {
            return Err(AppError::missing_setting(
                "--slack-webhook or SLACK_WEBHOOK_URL",
            ));
        }

        let webhook = Url::parse(&self.slack.webhook_url).map_err(|e| {
            AppError::config_with_source(
                format!("Invalid Slack webhook URL '{}'", self.slack.webhook_url),
                e,
            )
        })?;
        if !matches!(webhook.scheme(), "http" | "https") {
            return Err(AppError::config(format!(
                "Slack webhook URL must use http or https, got '{}'",
                webhook.scheme()
            )));
        }

        if self.http.timeout_secs == Some(0) {
            return Err(AppError::config("HTTP timeout must be greater than zero"));
        }

        self.listen_addr().map(|_| ())
    }

    /// Listen address in a form tokio can bind. A bare `:port` means every
    /// interface.
    pub fn listen_addr(&self) -> AppResult<String> {
        let addr = self.server.http_addr.trim();
        let normalized = if addr.starts_with(':') {
            format!("0.0.0.0{}", addr)
        } else {
            addr.to_string()
        };

        let valid_port = normalized
            .rsplit_once(':')
            .map(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok())
            .unwrap_or(false);
        if !valid_port {
            return Err(AppError::config(format!(
                "Invalid HTTP listen address '{}', expected [host]:port",
                self.server.http_addr
            )));
        }

        Ok(normalized)
    }

    /// Host part of the webhook URL, safe to log without leaking the secret path
    pub fn webhook_host(&self) -> String {
        Url::parse(&self.slack.webhook_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| "unknown".to_string())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
