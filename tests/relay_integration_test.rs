//! End-to-end tests: router plus the real outbound clients against mock
//! webhook and confirmation endpoints.

use axum::http::StatusCode;
use chrono::{DateTime, Local, SecondsFormat};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

use common::{config_for, post_to_relay, slack_payload};

fn local_rfc3339(utc: &str) -> String {
    DateTime::parse_from_rfc3339(utc)
        .unwrap()
        .with_timezone(&Local)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[tokio::test]
async fn test_notification_is_posted_to_webhook() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/services/T/B/X"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let (status, body) = post_to_relay(
        &config,
        r#"{"Type":"Notification","Subject":"Alarm","Message":"CPU high","Timestamp":"2023-01-01T00:00:00Z"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(String::from_utf8_lossy(&requests[0].body).starts_with("payload="));

    let payload = slack_payload(&requests[0].body);
    assert_eq!(
        payload["text"],
        format!("{} [Alarm] CPU high", local_rfc3339("2023-01-01T00:00:00Z"))
    );
    assert_eq!(payload["channel"], "#alerts");
    assert_eq!(payload["username"], "aws");
    assert!(payload.get("icon_url").is_none());
    assert!(payload.get("icon_emoji").is_none());
}

#[tokio::test]
async fn test_subscription_confirmation_visits_subscribe_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/confirm"))
        .and(query_param("token", "abc"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let body = format!(
        r#"{{"Type":"SubscriptionConfirmation","SubscribeURL":"{}/confirm?token=abc"}}"#,
        server.uri()
    );
    let (status, response_body) = post_to_relay(&config, &body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(response_body.is_empty());

    // Exactly the one GET, no webhook POST
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method.as_str(), "GET");
}

#[tokio::test]
async fn test_unknown_type_makes_no_outbound_call() {
    let server = MockServer::start().await;
    let config = config_for(&server);

    let (status, body) = post_to_relay(
        &config,
        r#"{"Type":"UnsubscribeConfirmation","SubscribeURL":"http://example.test/x"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_body_returns_500_without_outbound_call() {
    let server = MockServer::start().await;
    let config = config_for(&server);

    let (status, body) = post_to_relay(&config, "not json").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_webhook_error_status_returns_500() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("channel_is_archived"))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let (status, body) = post_to_relay(
        &config,
        r#"{"Type":"Notification","Subject":"s","Message":"m","Timestamp":"2023-01-01T00:00:00Z"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("channel_is_archived"));
}

#[tokio::test]
async fn test_confirmation_error_status_returns_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let body = format!(
        r#"{{"Type":"SubscriptionConfirmation","SubscribeURL":"{}/confirm"}}"#,
        server.uri()
    );
    let (status, response_body) = post_to_relay(&config, &body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response_body.contains("failed to confirm SNS subscription"));
}
