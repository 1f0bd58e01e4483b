//! Follow Relay Binary
//!
//! Runs one relay flow end to end: handshake, query, webhook submission
//! with bounded-backoff retries.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RELAY_ENDPOINT`: handshake URL (e.g. `https://host/hiring/generateWebhook`).
//!   When unset, a canned offline dataset is used instead of the network.
//! - `RELAY_NAME`: applicant name (default: "Demo User")
//! - `RELAY_REG_NO`: registration number (default: "REG12347")
//! - `RELAY_EMAIL`: contact email (default: "demo@example.test")
//! - `RUST_LOG`: log level filter (default: info)
//!
//! ## Usage
//!
//! ```bash
//! RELAY_ENDPOINT=https://host/hiring/generateWebhook cargo run --bin follow_relay --features http
//! ```

use tracing::info;
use tracing_subscriber::EnvFilter;

use async_trait::async_trait;
use follow_relay::{
    FixtureSource, FlowError, HttpDatasetSource, HttpWebhookTransport, RegistrationRequest,
    RelayFlow, StatusObserver, StatusUpdate, SubmissionPayload, TransportError, WebhookTransport,
};

/// Webhook stand-in for offline mode: logs the payload and accepts it.
struct LoggingTransport;

#[async_trait]
impl WebhookTransport for LoggingTransport {
    async fn deliver(
        &self,
        url: &str,
        _bearer_token: &str,
        payload: &SubmissionPayload,
    ) -> Result<(), TransportError> {
        info!(
            url,
            payload = %serde_json::to_string(payload).unwrap_or_default(),
            "offline mode: accepting submission locally"
        );
        Ok(())
    }
}

/// Observer that mirrors every status transition into the log.
struct LogObserver;

impl StatusObserver for LogObserver {
    fn on_status(&self, update: &StatusUpdate) {
        info!(
            step = %update.step,
            retry_count = update.retry_count,
            details = update.details.as_deref(),
            "{}",
            update.message
        );
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), FlowError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "follow_relay=info".into()),
        )
        .init();

    let registration = RegistrationRequest::new(
        env_or("RELAY_NAME", "Demo User"),
        env_or("RELAY_REG_NO", "REG12347"),
        env_or("RELAY_EMAIL", "demo@example.test"),
    );

    let outcome = match std::env::var("RELAY_ENDPOINT") {
        Ok(endpoint) => {
            info!(%endpoint, "running against remote service");
            let flow = RelayFlow::new(
                HttpDatasetSource::new(endpoint),
                HttpWebhookTransport::new(),
                registration,
            );
            flow.run(&LogObserver).await?
        }
        Err(_) => {
            info!("RELAY_ENDPOINT unset, running against the offline fixture");
            let flow = RelayFlow::new(
                FixtureSource::mutual_pairs_demo(),
                LoggingTransport,
                registration,
            );
            flow.run(&LogObserver).await?
        }
    };

    info!(
        retry_count = outcome.report.retry_count,
        payload = %serde_json::to_string(&outcome.payload).unwrap_or_default(),
        "relay flow completed"
    );
    Ok(())
}
