//! Exact-depth reachability (question 2, "Nth-level followers").

use std::collections::HashSet;

use crate::graph::FollowsGraph;
use crate::types::UserId;

/// Find the ids first reached at exactly graph-distance `n` from `start`.
///
/// ## Algorithm
///
/// Layer-by-layer BFS over directed follows-edges. A visited set seeded
/// with `{start}` gates every enqueue, so an id reached at a smaller depth
/// is never reported again at depth `n`, cycles cannot loop, and the output
/// carries no duplicates. The loop exits early once a frontier comes up
/// empty: every deeper level is empty too.
///
/// `n == 0` returns `[start]`. A start id with no outgoing edges (including
/// one absent from the graph entirely) empties the frontier after one step,
/// so any `n >= 1` returns the empty list. Output is sorted ascending.
pub fn find_nth_level(graph: &FollowsGraph, start: UserId, n: u32) -> Vec<UserId> {
    let mut visited: HashSet<UserId> = HashSet::new();
    visited.insert(start);

    let mut frontier = vec![start];

    for _ in 0..n {
        if frontier.is_empty() {
            break;
        }
        let mut next = Vec::new();
        for id in &frontier {
            for target in graph.follows_of(*id) {
                if visited.insert(target) {
                    next.push(target);
                }
            }
        }
        frontier = next;
    }

    frontier.sort();
    frontier
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserRecord;

    fn ids(raw: &[u64]) -> Vec<UserId> {
        raw.iter().copied().map(UserId::new).collect()
    }

    fn diamond() -> FollowsGraph {
        FollowsGraph::from_users(&[
            UserRecord::new(1, "Alice", vec![2, 3]),
            UserRecord::new(2, "Bob", vec![4]),
            UserRecord::new(3, "Charlie", vec![4, 5]),
            UserRecord::new(4, "David", vec![6]),
            UserRecord::new(5, "Eva", vec![6]),
            UserRecord::new(6, "Frank", vec![]),
        ])
    }

    #[test]
    fn worked_example() {
        assert_eq!(find_nth_level(&diamond(), UserId::new(1), 2), ids(&[4, 5]));
    }

    #[test]
    fn depth_zero_is_the_start_itself() {
        assert_eq!(find_nth_level(&diamond(), UserId::new(1), 0), ids(&[1]));
        // Even for a start the graph has never heard of.
        assert_eq!(
            find_nth_level(&diamond(), UserId::new(42), 0),
            ids(&[42])
        );
    }

    #[test]
    fn shortest_path_wins_over_longer_routes() {
        // 6 is reachable at depth 3 via both branches but first reached there;
        // 4 is first reached at depth 2, so it is absent from depth 3.
        assert_eq!(find_nth_level(&diamond(), UserId::new(1), 3), ids(&[6]));
        assert_eq!(find_nth_level(&diamond(), UserId::new(1), 4), ids(&[]));
    }

    #[test]
    fn cycles_terminate_and_yield_nothing_new() {
        let graph = FollowsGraph::from_users(&[
            UserRecord::new(1, "Alice", vec![2]),
            UserRecord::new(2, "Bob", vec![1]),
        ]);
        assert_eq!(find_nth_level(&graph, UserId::new(1), 3), ids(&[]));
    }

    #[test]
    fn unknown_start_is_empty_for_positive_depth() {
        assert_eq!(find_nth_level(&diamond(), UserId::new(42), 1), ids(&[]));
        assert_eq!(find_nth_level(&diamond(), UserId::new(42), 5), ids(&[]));
    }

    #[test]
    fn depth_beyond_the_graph_is_empty() {
        assert_eq!(find_nth_level(&diamond(), UserId::new(1), 100), ids(&[]));
    }

    #[test]
    fn dangling_targets_are_reported_but_expand_to_nothing() {
        let graph = FollowsGraph::from_users(&[UserRecord::new(1, "Alice", vec![7, 8])]);
        assert_eq!(find_nth_level(&graph, UserId::new(1), 1), ids(&[7, 8]));
        assert_eq!(find_nth_level(&graph, UserId::new(1), 2), ids(&[]));
    }
}
