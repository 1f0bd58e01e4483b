//! Core types for the relay.

pub mod user;
pub mod dataset;
pub mod outcome;
pub mod status;

pub use user::{UserId, UserRecord};
pub use dataset::{DatasetShape, ReachabilityRequest, ProcessingError};
pub use outcome::{MutualPair, QueryOutcome, SubmissionPayload};
pub use status::{Step, StatusUpdate, StatusObserver, NoOpObserver, RecordingObserver};
