use chrono::{DateTime, Local, SecondsFormat};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::errors::AppResult;

/// Value of the `Type` field of an SNS HTTP(S) delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum MessageType {
    Notification,
    SubscriptionConfirmation,
    UnsubscribeConfirmation,
    /// Any type this relay does not act on, including a missing `Type`
    #[default]
    #[serde(other)]
    Unknown,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Notification => "Notification",
            Self::SubscriptionConfirmation => "SubscriptionConfirmation",
            Self::UnsubscribeConfirmation => "UnsubscribeConfirmation",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire names of the fields of [`SnsMessage`]
const FIELD_NAMES: &[&str] = &[
    "Message",
    "MessageId",
    "Signature",
    "SignatureVersion",
    "SigningCertURL",
    "Subject",
    "SubscribeURL",
    "Timestamp",
    "Token",
    "TopicArn",
    "Type",
    "UnsubscribeURL",
];

/// An Amazon SNS message as POSTed to an HTTP(S) subscription endpoint.
///
/// Field names match case-insensitively. Unknown fields are ignored; missing
/// and `null` ones fall back to empty values. `SubscribeURL` and `Token` are
/// only present on subscription confirmations.
#[derive(Debug, Clone, Deserialize)]
pub struct SnsMessage {
    #[serde(rename = "Message", default)]
    pub message: String,
    #[serde(rename = "MessageId", default)]
    pub message_id: String,
    #[serde(rename = "Signature", default)]
    pub signature: String,
    #[serde(rename = "SignatureVersion", default)]
    pub signature_version: String,
    #[serde(rename = "SigningCertURL", default)]
    pub signing_cert_url: String,
    #[serde(rename = "Subject", default)]
    pub subject: String,
    #[serde(rename = "SubscribeURL", default)]
    pub subscribe_url: String,
    /// UTC on the wire, held in the process's local zone
    #[serde(rename = "Timestamp", default = "zero_timestamp")]
    pub timestamp: DateTime<Local>,
    #[serde(rename = "Token", default)]
    pub token: String,
    #[serde(rename = "TopicArn", default)]
    pub topic_arn: String,
    #[serde(rename = "Type", default)]
    pub message_type: MessageType,
    #[serde(rename = "UnsubscribeURL", default)]
    pub unsubscribe_url: String,
}

/// 0001-01-01T00:00:00Z, the timestamp of a message that carried none
fn zero_timestamp() -> DateTime<Local> {
    DateTime::from_timestamp(-62_135_596_800, 0)
        .unwrap_or_default()
        .with_timezone(&Local)
}

impl SnsMessage {
    /// Decode the JSON document of an SNS POST
    pub fn from_slice(body: &[u8]) -> AppResult<Self> {
        let document: Value = serde_json::from_slice(body)?;
        Ok(serde_json::from_value(canonicalize(document))?)
    }

    /// Timestamp rendered as RFC3339 with whole seconds, `Z` for UTC
    pub fn timestamp_rfc3339(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Rename keys to their canonical field name, ignoring case, and drop `null`
/// values so those fields take their defaults. An exact-case key wins over a
/// case-folded one. A top-level `null` is an empty message.
fn canonicalize(document: Value) -> Value {
    let fields = match document {
        Value::Object(fields) => fields,
        Value::Null => return Value::Object(Map::new()),
        other => return other,
    };

    let mut canonical = Map::new();
    let mut exact = Vec::new();
    for (key, value) in fields {
        if value.is_null() {
            continue;
        }
        match FIELD_NAMES.iter().find(|name| name.eq_ignore_ascii_case(&key)) {
            Some(name) if *name == key => {
                exact.push(key.clone());
                canonical.insert(key, value);
            }
            Some(name) => {
                if !exact.iter().any(|k| k == name) {
                    canonical.insert(name.to_string(), value);
                }
            }
            None => {
                canonical.insert(key, value);
            }
        }
    }
    Value::Object(canonical)
}

/// `<timestamp> [<subject>] <message>`, the text forwarded to Slack
impl fmt::Display for SnsMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.timestamp_rfc3339(),
            self.subject,
            self.message
        )
    }
}
