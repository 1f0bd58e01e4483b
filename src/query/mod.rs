//! Graph queries.
//!
//! Both queries are synchronous pure functions over a [`FollowsGraph`]:
//! no suspension points, no shared state, safe to call from any thread.

pub mod mutual;
pub mod reachability;

pub use mutual::find_mutual_pairs;
pub use reachability::find_nth_level;
