//! Query outcomes and the submission wire payload.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::user::UserId;

/// An unordered pair of users who each follow the other.
///
/// Canonicalized on construction: the smaller id always comes first, so two
/// pairs over the same users compare equal. Serializes as a two-element
/// array `[a, b]` to match the webhook wire format. Output-only, never
/// mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MutualPair(UserId, UserId);

impl MutualPair {
    /// Create a pair, ordering the ids so the smaller comes first.
    ///
    /// Callers must not pass `a == b`; a self-follow never forms a pair.
    pub fn new(a: UserId, b: UserId) -> Self {
        debug_assert_ne!(a, b, "a mutual pair requires two distinct users");
        if a < b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// The smaller id.
    pub fn first(&self) -> UserId {
        self.0
    }

    /// The larger id.
    pub fn second(&self) -> UserId {
        self.1
    }
}

impl fmt::Display for MutualPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.0, self.1)
    }
}

/// Result of whichever query the dataset requested.
///
/// Untagged on the wire: the webhook receives either a list of pairs or a
/// flat list of ids under `outcome`, exactly as the grading service expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryOutcome {
    /// Mutual-pair list, ascending by first element.
    MutualPairs(Vec<MutualPair>),
    /// Sorted ids at exactly the requested depth.
    Reachability(Vec<UserId>),
}

impl QueryOutcome {
    /// Number of result entries, whichever variant.
    pub fn len(&self) -> usize {
        match self {
            Self::MutualPairs(pairs) => pairs.len(),
            Self::Reachability(ids) => ids.len(),
        }
    }

    /// True when the query produced no results.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The payload POSTed to the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    /// Registration number identifying the submitter.
    #[serde(rename = "regNo")]
    pub reg_no: String,
    /// The query result.
    pub outcome: QueryOutcome,
}

impl SubmissionPayload {
    /// Create a submission payload.
    pub fn new(reg_no: impl Into<String>, outcome: QueryOutcome) -> Self {
        Self {
            reg_no: reg_no.into(),
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_canonicalizes_order() {
        let pair = MutualPair::new(UserId::new(9), UserId::new(3));
        assert_eq!(pair.first(), UserId::new(3));
        assert_eq!(pair.second(), UserId::new(9));
        assert_eq!(pair, MutualPair::new(UserId::new(3), UserId::new(9)));
    }

    #[test]
    fn pair_serializes_as_array() {
        let pair = MutualPair::new(UserId::new(1), UserId::new(2));
        assert_eq!(serde_json::to_string(&pair).unwrap(), "[1,2]");
    }

    #[test]
    fn payload_uses_camel_case_reg_no() {
        let payload = SubmissionPayload::new(
            "REG12347",
            QueryOutcome::MutualPairs(vec![MutualPair::new(UserId::new(1), UserId::new(2))]),
        );
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"regNo":"REG12347","outcome":[[1,2]]}"#);
    }

    #[test]
    fn reachability_outcome_is_flat_list() {
        let payload = SubmissionPayload::new(
            "REG12346",
            QueryOutcome::Reachability(vec![UserId::new(4), UserId::new(5)]),
        );
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"regNo":"REG12346","outcome":[4,5]}"#);
    }
}
