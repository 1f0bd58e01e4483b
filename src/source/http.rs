//! Reqwest-backed dataset source.

use async_trait::async_trait;

use super::{DatasetSource, RegistrationRequest, SourceError, WebhookHandshake};

/// Dataset source that performs the real handshake POST.
#[derive(Debug, Clone)]
pub struct HttpDatasetSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpDatasetSource {
    /// Create a source against a handshake endpoint
    /// (e.g. `https://host/hiring/generateWebhook`).
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Create a source reusing an existing client.
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl DatasetSource for HttpDatasetSource {
    async fn fetch(&self, request: &RegistrationRequest) -> Result<WebhookHandshake, SourceError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::BadResponse(format!(
                "status {}",
                response.status()
            )));
        }

        response
            .json::<WebhookHandshake>()
            .await
            .map_err(|e| SourceError::BadResponse(e.to_string()))
    }
}
