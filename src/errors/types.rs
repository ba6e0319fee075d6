//! Error types for the aws-sns-slack relay
//!
//! Every failure a request can hit maps onto one of three variants: the inbound
//! SNS document could not be decoded, the Slack webhook could not be reached,
//! or the subscription confirmation GET failed. The remaining variants only
//! occur at startup, before the listener is bound.

use std::path::PathBuf;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    // Inbound message errors
    #[error("failed to decode SNS message: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Outbound errors
    #[error("failed to deliver message to Slack webhook: {message}")]
    Delivery {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("failed to confirm SNS subscription at '{url}': {message}")]
    Confirmation {
        url: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Startup errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Missing required setting: {setting}")]
    MissingSetting { setting: String },

    #[error("File I/O error for '{path}': {operation}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Server error: {message}")]
    Server {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new Decode error with source
    pub fn decode_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new Delivery error
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new Delivery error with source
    pub fn delivery_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Delivery {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new Confirmation error
    pub fn confirmation(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Confirmation {
            url: url.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a new Confirmation error with source
    pub fn confirmation_with_source(
        url: impl Into<String>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Confirmation {
            url: url.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new Config error with source
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new MissingSetting error
    pub fn missing_setting(setting: impl Into<String>) -> Self {
        Self::MissingSetting {
            setting: setting.into(),
        }
    }

    /// Create a new I/O error with source
    pub fn io_with_source(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Io {
            path: path.into(),
            operation: operation.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new Server error with source
    pub fn server_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Server {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Decode { .. } => "decode",
            Self::Delivery { .. } => "delivery",
            Self::Confirmation { .. } => "confirmation",
            Self::Config { .. } | Self::MissingSetting { .. } => "config",
            Self::Io { .. } => "io",
            Self::Server { .. } => "server",
        }
    }

    /// Render the error together with its source chain, the way it is
    /// reported back to SNS in a 500 response body.
    pub fn detailed_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }
        message
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        let context = if err.is_eof() {
            "unexpected end of JSON input".to_string()
        } else if err.is_syntax() {
            format!("JSON syntax error at line {} column {}", err.line(), err.column())
        } else if err.line() == 0 {
            "unexpected JSON shape".to_string()
        } else {
            format!("unexpected JSON shape at line {} column {}", err.line(), err.column())
        };
        Self::decode_with_source(context, err)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("Failed to parse config file", err)
    }
}
