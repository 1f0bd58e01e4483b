//! User types for the follows-graph.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a user in the follows-graph.
///
/// Wraps a `u64` (ids are non-negative integers) and implements `Ord`
/// for deterministic ordering of query output.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Create a new UserId.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner integer.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A user record as delivered by the dataset source.
///
/// `follows` is taken as-is from the wire: entries may reference ids that
/// exist nowhere in the dataset and may contain duplicates. Both are plain
/// data, not errors; the graph build dedups and queries tolerate dangling
/// targets. Immutable for the duration of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name. Carried through untouched; no query reads it.
    pub name: String,
    /// Ids this user follows, in wire order.
    pub follows: Vec<UserId>,
}

impl UserRecord {
    /// Create a new user record.
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, follows: Vec<u64>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            follows: follows.into_iter().map(UserId::new).collect(),
        }
    }
}
