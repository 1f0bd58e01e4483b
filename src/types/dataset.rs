//! Dataset ingestion - resolving a raw payload into a tagged shape.
//!
//! The remote service serves two payload shapes behind the same field:
//!
//! ```text
//! question 1:  { "users": [ {id, name, follows}, ... ] }
//! question 2:  { "users": { "n": N, "findId": ID, "users": [...] } }
//! ```
//!
//! Rather than letting every consumer sniff the shape ad hoc, ingestion
//! resolves the payload into a [`DatasetShape`] exactly once. An explicit
//! `question` discriminator from the handshake wins; structural inspection
//! (the presence of an `n`-bearing wrapper) is the fallback.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

use super::user::{UserId, UserRecord};

/// Error type for dataset ingestion.
///
/// All variants are fail-fast: a malformed dataset aborts the flow with no
/// partial results, and is never retried.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    /// The payload did not match either known shape.
    #[error("Malformed dataset: {0}")]
    MalformedShape(String),

    /// The handshake named a question this relay does not implement.
    #[error("Unknown question discriminator: {0}")]
    UnknownQuestion(u8),

    /// A user id appeared more than once in the dataset.
    #[error("Duplicate user id in dataset: {0}")]
    DuplicateUserId(UserId),
}

/// Parameters for the exact-depth reachability query (question 2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReachabilityRequest {
    /// Target depth N.
    pub n: u32,
    /// Start id for the BFS.
    #[serde(rename = "findId")]
    pub find_id: UserId,
    /// The user collection.
    pub users: Vec<UserRecord>,
}

/// A dataset payload resolved to the query it requests.
///
/// Constructed only through [`DatasetShape::resolve`], so downstream code
/// never re-inspects raw JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetShape {
    /// Question 1: find all mutual follower pairs.
    MutualPairs(Vec<UserRecord>),
    /// Question 2: find users at exactly depth N from a start id.
    Reachability(ReachabilityRequest),
}

/// Wire wrapper around the polymorphic `users` field.
#[derive(Deserialize)]
struct RawEnvelope {
    users: Value,
}

impl DatasetShape {
    /// Resolve a raw payload into a tagged shape.
    ///
    /// `question`, when present, is authoritative (1 = mutual pairs,
    /// 2 = reachability). Without it the shape is inferred structurally:
    /// an object carrying `n` under `users` means reachability, an array
    /// means mutual pairs.
    ///
    /// Validates the id-uniqueness invariant of the user collection.
    pub fn resolve(data: &Value, question: Option<u8>) -> Result<Self, ProcessingError> {
        let envelope: RawEnvelope = serde_json::from_value(data.clone())
            .map_err(|e| ProcessingError::MalformedShape(format!("missing users field: {e}")))?;

        let shape = match question {
            Some(1) => Self::MutualPairs(parse_users(&envelope.users)?),
            Some(2) => Self::Reachability(parse_reachability(&envelope.users)?),
            Some(q) => return Err(ProcessingError::UnknownQuestion(q)),
            None => {
                // Structural fallback: an `n`-bearing wrapper marks question 2.
                if envelope.users.get("n").is_some() {
                    Self::Reachability(parse_reachability(&envelope.users)?)
                } else {
                    Self::MutualPairs(parse_users(&envelope.users)?)
                }
            }
        };

        check_unique_ids(shape.users())?;
        Ok(shape)
    }

    /// The user collection, whichever shape holds it.
    pub fn users(&self) -> &[UserRecord] {
        match self {
            Self::MutualPairs(users) => users,
            Self::Reachability(req) => &req.users,
        }
    }

    /// Question number this shape corresponds to.
    pub fn question(&self) -> u8 {
        match self {
            Self::MutualPairs(_) => 1,
            Self::Reachability(_) => 2,
        }
    }
}

fn parse_users(value: &Value) -> Result<Vec<UserRecord>, ProcessingError> {
    serde_json::from_value(value.clone())
        .map_err(|e| ProcessingError::MalformedShape(format!("invalid user collection: {e}")))
}

fn parse_reachability(value: &Value) -> Result<ReachabilityRequest, ProcessingError> {
    serde_json::from_value(value.clone())
        .map_err(|e| ProcessingError::MalformedShape(format!("invalid reachability request: {e}")))
}

fn check_unique_ids(users: &[UserRecord]) -> Result<(), ProcessingError> {
    let mut seen = BTreeSet::new();
    for user in users {
        if !seen.insert(user.id) {
            return Err(ProcessingError::DuplicateUserId(user.id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mutual_payload() -> Value {
        json!({
            "users": [
                { "id": 1, "name": "Alice", "follows": [2] },
                { "id": 2, "name": "Bob", "follows": [1] }
            ]
        })
    }

    fn reachability_payload() -> Value {
        json!({
            "users": {
                "n": 2,
                "findId": 1,
                "users": [
                    { "id": 1, "name": "Alice", "follows": [2] },
                    { "id": 2, "name": "Bob", "follows": [] }
                ]
            }
        })
    }

    #[test]
    fn explicit_question_wins() {
        let shape = DatasetShape::resolve(&mutual_payload(), Some(1)).unwrap();
        assert_eq!(shape.question(), 1);
    }

    #[test]
    fn structural_fallback_detects_n_wrapper() {
        let shape = DatasetShape::resolve(&reachability_payload(), None).unwrap();
        match shape {
            DatasetShape::Reachability(req) => {
                assert_eq!(req.n, 2);
                assert_eq!(req.find_id, UserId::new(1));
                assert_eq!(req.users.len(), 2);
            }
            other => panic!("expected reachability shape, got {other:?}"),
        }
    }

    #[test]
    fn structural_fallback_detects_flat_collection() {
        let shape = DatasetShape::resolve(&mutual_payload(), None).unwrap();
        assert!(matches!(shape, DatasetShape::MutualPairs(ref users) if users.len() == 2));
    }

    #[test]
    fn unknown_question_rejected() {
        let err = DatasetShape::resolve(&mutual_payload(), Some(7)).unwrap_err();
        assert!(matches!(err, ProcessingError::UnknownQuestion(7)));
    }

    #[test]
    fn missing_users_field_rejected() {
        let err = DatasetShape::resolve(&json!({ "data": [] }), None).unwrap_err();
        assert!(matches!(err, ProcessingError::MalformedShape(_)));
    }

    #[test]
    fn duplicate_user_id_rejected() {
        let payload = json!({
            "users": [
                { "id": 1, "name": "Alice", "follows": [] },
                { "id": 1, "name": "Alice again", "follows": [] }
            ]
        });
        let err = DatasetShape::resolve(&payload, None).unwrap_err();
        assert!(matches!(err, ProcessingError::DuplicateUserId(id) if id == UserId::new(1)));
    }
}
