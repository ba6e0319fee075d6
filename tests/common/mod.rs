//! Common test utilities and helpers
//!
//! Reusable helpers for driving the relay binary and the relay router in
//! integration tests.

#![allow(dead_code)]

use assert_cmd::Command;
use aws_sns_slack::config::Config;
use aws_sns_slack::server::{relay_from_config, router};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use wiremock::MockServer;

/// Command for the aws-sns-slack binary with relay-related environment cleared
pub fn relay_command() -> Command {
    let mut cmd = Command::cargo_bin("aws-sns-slack").expect("Failed to find aws-sns-slack binary");
    for var in [
        "HTTP_ADDR",
        "SLACK_WEBHOOK_URL",
        "SLACK_CHANNEL",
        "SLACK_USERNAME",
        "SLACK_ICON_URL",
        "SLACK_ICON_EMOJI",
        "HTTP_TIMEOUT_SECS",
        "AWS_SNS_SLACK_CONFIG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Relay configuration pointing at `<mock server>/services/T/B/X`
pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.slack.webhook_url = format!("{}/services/T/B/X", server.uri());
    config.slack.channel = Some("#alerts".to_string());
    config.slack.username = Some("aws".to_string());
    config
}

/// POST `body` to the relay router built from `config`
pub async fn post_to_relay(config: &Config, body: &str) -> (StatusCode, String) {
    let app = router(relay_from_config(config).expect("Failed to build relay"));
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("Content-Type", "text/plain; charset=UTF-8")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Decode the `payload` form field of a webhook request into JSON
pub fn slack_payload(body: &[u8]) -> serde_json::Value {
    let payload = url::form_urlencoded::parse(body)
        .find(|(key, _)| key == "payload")
        .map(|(_, value)| value.into_owned())
        .expect("request has no payload field");
    serde_json::from_str(&payload).expect("payload is not JSON")
}
