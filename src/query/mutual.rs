//! Mutual-pair detection (question 1).

use crate::graph::FollowsGraph;
use crate::types::MutualPair;

/// Find every unordered pair of distinct users who follow each other.
///
/// ## Algorithm
///
/// For every directed edge `(u, f)` with `u < f`, test whether `f`'s follow
/// set contains `u`; if so, emit `[u, f]`. The `u < f` filter is what
/// guarantees each reciprocal pair is emitted exactly once (and that a
/// self-follow never forms a pair) without a separate seen-set.
///
/// Each emission already carries distinct, ascending first elements thanks
/// to the ordered graph iteration, but the final sort is explicit so the
/// ordering contract does not depend on the map implementation.
///
/// Dangling follow targets have empty follow sets and contribute nothing;
/// an empty graph yields an empty list.
pub fn find_mutual_pairs(graph: &FollowsGraph) -> Vec<MutualPair> {
    let mut pairs = Vec::new();

    for (user, follows) in graph.iter() {
        for &target in follows {
            if user >= target {
                continue;
            }
            if graph.follows(target, user) {
                pairs.push(MutualPair::new(user, target));
            }
        }
    }

    pairs.sort();
    pairs
}
