//! # follow-relay
//!
//! Follower-graph queries with authenticated webhook delivery.
//!
//! The relay answers one assignment:
//!
//! > Given a follows-graph dataset from a remote service, run the requested
//! > query and deliver the result to a webhook, retrying with bounded backoff.
//!
//! ## Core Contract
//!
//! 1. Fetch a dataset handshake (webhook URL + bearer token + raw payload)
//! 2. Resolve the payload into a tagged [`DatasetShape`] exactly once
//! 3. Run the matching query: mutual-pair detection or exact-depth BFS
//! 4. Deliver the result with exponential-backoff retries up to a hard cap
//!
//! ## Architecture
//!
//! ```text
//! DatasetSource → DatasetShape → FollowsGraph → QueryOutcome
//!                                                    ↓
//!                 StatusObserver ← SubmissionEngine → WebhookTransport
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Mutual pairs are duplicate-free and ascending by first id
//! - Reachability output is the sorted frontier at exactly depth N
//! - Retry delays follow `base_delay * 2^retry` with a configurable cap

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod graph;
pub mod query;
pub mod submit;
pub mod source;
pub mod webhook;
pub mod flow;

// Re-exports
pub use types::{UserId, UserRecord, MutualPair, QueryOutcome, SubmissionPayload};
pub use types::dataset::{DatasetShape, ReachabilityRequest, ProcessingError};
pub use types::status::{Step, StatusUpdate, StatusObserver, NoOpObserver, RecordingObserver};
pub use graph::FollowsGraph;
pub use query::{find_mutual_pairs, find_nth_level};
pub use submit::{
    RetryPolicy, RetryTimer, TokioTimer, RecordingTimer, SubmissionEngine, SubmissionState,
    SubmissionReport, AttemptRecord, AttemptOutcome, TransportError, SubmissionExhausted,
};
pub use source::{DatasetSource, FixtureSource, WebhookHandshake, RegistrationRequest, SourceError};
pub use webhook::WebhookTransport;
pub use flow::{RelayFlow, RelayOutcome, FlowError, run_query};

#[cfg(feature = "http")]
pub use source::HttpDatasetSource;
#[cfg(feature = "http")]
pub use webhook::HttpWebhookTransport;

/// Schema version for all relay wire types.
/// Increment on breaking changes to any payload shape.
pub const RELAY_SCHEMA_VERSION: &str = "1.0.0";
