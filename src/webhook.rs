//! Webhook delivery transport.
//!
//! The retry engine never talks to the network directly; it drives a
//! [`WebhookTransport`]. The real reqwest-backed transport lives behind the
//! `http` feature, and `test_support` ships a scripted fake so the retry
//! policy is tested independently of any particular network mock.

use async_trait::async_trait;

use crate::submit::TransportError;
use crate::types::SubmissionPayload;

/// Transport that delivers a result payload to a webhook endpoint.
///
/// `deliver` resolves to `Ok(())` on acceptance or a [`TransportError`]
/// otherwise; the engine treats every error uniformly as one failed
/// attempt. No response body contract exists.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    /// POST `payload` to `url` with a bearer-style credential.
    async fn deliver(
        &self,
        url: &str,
        bearer_token: &str,
        payload: &SubmissionPayload,
    ) -> Result<(), TransportError>;
}

#[async_trait]
impl<T: WebhookTransport + ?Sized> WebhookTransport for std::sync::Arc<T> {
    async fn deliver(
        &self,
        url: &str,
        bearer_token: &str,
        payload: &SubmissionPayload,
    ) -> Result<(), TransportError> {
        (**self).deliver(url, bearer_token, payload).await
    }
}

/// Reqwest-backed webhook transport.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Default)]
pub struct HttpWebhookTransport {
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpWebhookTransport {
    /// Create a transport with a fresh client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport reusing an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl WebhookTransport for HttpWebhookTransport {
    async fn deliver(
        &self,
        url: &str,
        bearer_token: &str,
        payload: &SubmissionPayload,
    ) -> Result<(), TransportError> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, bearer_token)
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(TransportError::Rejected(format!(
                "status {}",
                response.status()
            )))
        }
    }
}

/// Scripted transports for exercising the retry engine.
pub mod test_support {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// One recorded delivery call.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedDelivery {
        /// Target URL.
        pub url: String,
        /// Credential presented.
        pub bearer_token: String,
        /// Payload offered.
        pub payload: SubmissionPayload,
    }

    /// Transport that fails a scripted number of leading attempts.
    ///
    /// Deterministic failure injection: the first `fail_first` calls
    /// resolve to [`TransportError::Network`], every later call succeeds.
    /// Records every call for inspection.
    #[derive(Debug, Default)]
    pub struct ScriptedTransport {
        fail_first: u32,
        calls: AtomicU32,
        deliveries: Mutex<Vec<RecordedDelivery>>,
    }

    impl ScriptedTransport {
        /// Fail the first `n` attempts, then succeed.
        pub fn failing_first(n: u32) -> Self {
            Self {
                fail_first: n,
                ..Self::default()
            }
        }

        /// Fail every attempt.
        pub fn always_failing() -> Self {
            Self::failing_first(u32::MAX)
        }

        /// Number of delivery calls seen.
        pub fn call_count(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }

        /// Every delivery call, in order.
        pub fn deliveries(&self) -> Vec<RecordedDelivery> {
            self.deliveries
                .lock()
                .expect("delivery lock poisoned")
                .clone()
        }
    }

    #[async_trait]
    impl WebhookTransport for ScriptedTransport {
        async fn deliver(
            &self,
            url: &str,
            bearer_token: &str,
            payload: &SubmissionPayload,
        ) -> Result<(), TransportError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.deliveries
                .lock()
                .expect("delivery lock poisoned")
                .push(RecordedDelivery {
                    url: url.to_string(),
                    bearer_token: bearer_token.to_string(),
                    payload: payload.clone(),
                });
            if call < self.fail_first {
                Err(TransportError::Network(format!(
                    "scripted failure on attempt {}",
                    call + 1
                )))
            } else {
                Ok(())
            }
        }
    }
}
