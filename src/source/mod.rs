//! Dataset source backends.
//!
//! The handshake with the remote service hands back everything one flow
//! needs: the webhook URL to submit to, a bearer token, the raw dataset
//! payload, and (sometimes) an explicit question discriminator.

pub mod fixture;

#[cfg(feature = "http")]
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error type for dataset fetching.
///
/// Surfaced immediately: the flow aborts on fetch failure, and this layer
/// never retries it.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The handshake request never resolved.
    #[error("Dataset fetch failed: {0}")]
    Network(String),
    /// The service answered with something other than a handshake.
    #[error("Dataset source returned an unusable response: {0}")]
    BadResponse(String),
}

/// Body of the handshake request registering this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    /// Applicant name.
    pub name: String,
    /// Registration number, echoed back in every submission.
    #[serde(rename = "regNo")]
    pub reg_no: String,
    /// Contact email.
    pub email: String,
}

impl RegistrationRequest {
    /// Create a registration request.
    pub fn new(
        name: impl Into<String>,
        reg_no: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            reg_no: reg_no.into(),
            email: email.into(),
        }
    }
}

/// The handshake response: where to submit, how to authenticate, and the
/// dataset to process.
///
/// `data` stays raw JSON here; [`DatasetShape::resolve`] turns it into a
/// tagged shape exactly once, inside the flow.
///
/// [`DatasetShape::resolve`]: crate::types::DatasetShape::resolve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookHandshake {
    /// Webhook URL the result must be POSTed to.
    pub webhook: String,
    /// Bearer-style credential for the submission.
    #[serde(rename = "accessToken")]
    pub access_token: String,
    /// Raw dataset payload.
    pub data: Value,
    /// Explicit question discriminator, when the service sends one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<u8>,
}

/// Trait for dataset source backends.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Perform the handshake and return the dataset to process.
    async fn fetch(&self, request: &RegistrationRequest) -> Result<WebhookHandshake, SourceError>;
}

pub use fixture::FixtureSource;

#[cfg(feature = "http")]
pub use http::HttpDatasetSource;
