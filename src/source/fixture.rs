//! In-memory dataset source for tests and demos.

use async_trait::async_trait;
use serde_json::json;

use super::{DatasetSource, RegistrationRequest, SourceError, WebhookHandshake};

/// Dataset source that serves a canned handshake.
///
/// Stands in for the remote service in tests and the demo binary's
/// offline mode.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    handshake: Option<WebhookHandshake>,
}

impl FixtureSource {
    /// Serve the given handshake on every fetch.
    pub fn new(handshake: WebhookHandshake) -> Self {
        Self {
            handshake: Some(handshake),
        }
    }

    /// Fail every fetch, for error-path tests.
    pub fn unavailable() -> Self {
        Self { handshake: None }
    }

    /// Canned mutual-pairs dataset (question 1).
    pub fn mutual_pairs_demo() -> Self {
        Self::new(WebhookHandshake {
            webhook: "https://example.test/hiring/testWebhook".to_string(),
            access_token: "fixture-token".to_string(),
            data: json!({
                "users": [
                    { "id": 1, "name": "Alice", "follows": [2, 3] },
                    { "id": 2, "name": "Bob", "follows": [1] },
                    { "id": 3, "name": "Charlie", "follows": [4] },
                    { "id": 4, "name": "David", "follows": [3] }
                ]
            }),
            question: Some(1),
        })
    }

    /// Canned reachability dataset (question 2).
    pub fn reachability_demo() -> Self {
        Self::new(WebhookHandshake {
            webhook: "https://example.test/hiring/testWebhook".to_string(),
            access_token: "fixture-token".to_string(),
            data: json!({
                "users": {
                    "n": 2,
                    "findId": 1,
                    "users": [
                        { "id": 1, "name": "Alice", "follows": [2, 3] },
                        { "id": 2, "name": "Bob", "follows": [4] },
                        { "id": 3, "name": "Charlie", "follows": [4, 5] },
                        { "id": 4, "name": "David", "follows": [6] },
                        { "id": 5, "name": "Eva", "follows": [6] },
                        { "id": 6, "name": "Frank", "follows": [] }
                    ]
                }
            }),
            question: Some(2),
        })
    }
}

#[async_trait]
impl DatasetSource for FixtureSource {
    async fn fetch(&self, _request: &RegistrationRequest) -> Result<WebhookHandshake, SourceError> {
        self.handshake
            .clone()
            .ok_or_else(|| SourceError::Network("fixture source is unavailable".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DatasetShape;

    fn request() -> RegistrationRequest {
        RegistrationRequest::new("Test User", "REG12347", "test@example.test")
    }

    #[tokio::test]
    async fn demo_fixtures_resolve_to_their_questions() {
        let q1 = FixtureSource::mutual_pairs_demo()
            .fetch(&request())
            .await
            .unwrap();
        let shape = DatasetShape::resolve(&q1.data, q1.question).unwrap();
        assert_eq!(shape.question(), 1);

        let q2 = FixtureSource::reachability_demo()
            .fetch(&request())
            .await
            .unwrap();
        let shape = DatasetShape::resolve(&q2.data, q2.question).unwrap();
        assert_eq!(shape.question(), 2);
    }

    #[tokio::test]
    async fn unavailable_fixture_fails_the_fetch() {
        let err = FixtureSource::unavailable()
            .fetch(&request())
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Network(_)));
    }
}
