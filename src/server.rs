//! HTTP listener for SNS deliveries
//!
//! A POST to any path takes the raw SNS document, so subscriptions may point
//! at `/`, `/sns` or any other path. Success is an empty 200; any failure is
//! a 500 whose plain-text body is the error message, which SNS records before
//! applying its own redelivery policy.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::clients::{build_http_client, SlackClient, SnsSubscriptionClient};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::relay::Relay;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.detailed_message()).into_response()
    }
}

/// Create the relay router
pub fn router(relay: Relay) -> Router {
    Router::new()
        .route("/", post(receive_sns_message))
        .route("/{*path}", post(receive_sns_message))
        .route("/health", get(health_check))
        .with_state(relay)
}

/// Wire the production clients from configuration into a relay
pub fn relay_from_config(config: &Config) -> AppResult<Relay> {
    let http = build_http_client(&config.http)?;
    let slack = SlackClient::new(http.clone(), config.slack.clone());
    let subscriptions = SnsSubscriptionClient::new(http);
    Ok(Relay::new(Arc::new(slack), Arc::new(subscriptions)))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn receive_sns_message(State(relay): State<Relay>, body: Bytes) -> Result<StatusCode, AppError> {
    match relay.handle(&body).await {
        Ok(outcome) => {
            info!(outcome = ?outcome, "Handled SNS message");
            Ok(StatusCode::OK)
        }
        Err(e) => {
            warn!(category = e.category(), error = %e.detailed_message(), "Failed to handle SNS message");
            Err(e)
        }
    }
}

/// Bind the configured address and serve until Ctrl-C or SIGTERM
pub async fn serve(config: &Config) -> AppResult<()> {
    let relay = relay_from_config(config)?;
    let addr = config.listen_addr()?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::server_with_source(format!("Failed to bind {}", addr), e))?;

    info!(
        addr = %addr,
        webhook_host = %config.webhook_host(),
        "aws-sns-slack listening"
    );

    axum::serve(listener, router(relay))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::server_with_source("HTTP server failed", e))?;

    info!("aws-sns-slack stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal, draining in-flight requests");
}
