//! In-memory follows-graph.
//!
//! Built once per query from the ingested user collection. Uses
//! BTreeMap/BTreeSet for deterministic iteration order, which is what makes
//! the mutual-pair scan come out sorted without extra bookkeeping.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{UserId, UserRecord};

/// Directed follows-graph: an edge u → v means u follows v.
///
/// Construction is O(total follow-edge count). Follow lists are dedupped
/// into sets. Nothing here can fail: a user following itself or following
/// an id that exists nowhere in the dataset is plain data, and the queries
/// give both well-defined (if degenerate) treatment.
#[derive(Debug, Clone, Default)]
pub struct FollowsGraph {
    follows: BTreeMap<UserId, BTreeSet<UserId>>,
}

impl FollowsGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the id → follow-set mapping from a user collection.
    pub fn from_users(users: &[UserRecord]) -> Self {
        let mut follows = BTreeMap::new();
        for user in users {
            follows.insert(user.id, user.follows.iter().copied().collect());
        }
        Self { follows }
    }

    /// The follow set of `id`, empty when the id is unknown.
    ///
    /// Unknown ids (dangling follow targets, absent start ids) resolve to
    /// the empty set rather than an error.
    pub fn follows_of(&self, id: UserId) -> impl Iterator<Item = UserId> + '_ {
        self.follows
            .get(&id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// True when `follower` has an edge to `target`.
    pub fn follows(&self, follower: UserId, target: UserId) -> bool {
        self.follows
            .get(&follower)
            .is_some_and(|set| set.contains(&target))
    }

    /// Iterate all nodes with their follow sets, ascending by id.
    pub fn iter(&self) -> impl Iterator<Item = (UserId, &BTreeSet<UserId>)> {
        self.follows.iter().map(|(id, set)| (*id, set))
    }

    /// Number of users with a recorded follow set.
    pub fn num_users(&self) -> usize {
        self.follows.len()
    }

    /// Total number of distinct directed edges.
    pub fn num_edges(&self) -> usize {
        self.follows.values().map(BTreeSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Vec<UserRecord> {
        vec![
            UserRecord::new(1, "Alice", vec![2, 3, 3]),
            UserRecord::new(2, "Bob", vec![2, 99]),
        ]
    }

    #[test]
    fn build_dedups_follow_lists() {
        let graph = FollowsGraph::from_users(&users());
        assert_eq!(graph.follows_of(UserId::new(1)).count(), 2);
        assert_eq!(graph.num_edges(), 4);
    }

    #[test]
    fn self_follow_and_dangling_target_are_plain_data() {
        let graph = FollowsGraph::from_users(&users());
        assert!(graph.follows(UserId::new(2), UserId::new(2)));
        assert!(graph.follows(UserId::new(2), UserId::new(99)));
        // 99 exists only as a target: its own follow set is empty.
        assert_eq!(graph.follows_of(UserId::new(99)).count(), 0);
    }

    #[test]
    fn unknown_id_yields_empty_set() {
        let graph = FollowsGraph::from_users(&users());
        assert_eq!(graph.follows_of(UserId::new(42)).count(), 0);
        assert!(!graph.follows(UserId::new(42), UserId::new(1)));
    }
}
