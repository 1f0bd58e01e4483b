//! Status reporting for flow observers.
//!
//! Every phase transition of the relay flow is published to a
//! [`StatusObserver`]. The observer is purely observational: it exerts no
//! backpressure and its return is ignored. UI layers (a status panel, a
//! toast notifier) implement this trait; the library ships a no-op and a
//! recording implementation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

/// Phase of the relay flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Flow constructed, nothing started.
    Init,
    /// Requesting the dataset handshake.
    Fetching,
    /// Resolving the shape and running the query.
    Processing,
    /// Delivering the result (includes scheduled retries).
    Submitting,
    /// Terminal: result accepted by the webhook.
    Completed,
    /// Terminal: fetch, processing, or exhausted submission failure.
    Error,
}

impl Step {
    /// Parse a step from its wire string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "init" => Some(Self::Init),
            "fetching" => Some(Self::Fetching),
            "processing" => Some(Self::Processing),
            "submitting" => Some(Self::Submitting),
            "completed" => Some(Self::Completed),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// True for states from which no further automatic transition occurs.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::Fetching => write!(f, "fetching"),
            Self::Processing => write!(f, "processing"),
            Self::Submitting => write!(f, "submitting"),
            Self::Completed => write!(f, "completed"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A single status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// Current flow phase.
    pub step: Step,
    /// Human-readable summary.
    pub message: String,
    /// Optional error detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Count of failed submission attempts so far, when in/after submission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<u32>,
}

impl StatusUpdate {
    /// Create an update with just a step and message.
    pub fn new(step: Step, message: impl Into<String>) -> Self {
        Self {
            step,
            message: message.into(),
            details: None,
            retry_count: None,
        }
    }

    /// Attach error detail.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Attach the current retry count.
    pub fn with_retry_count(mut self, count: u32) -> Self {
        self.retry_count = Some(count);
        self
    }
}

/// Observer for flow status transitions.
///
/// Invoked synchronously relative to each transition (never batched).
/// Implementations must not block; there is no backpressure path.
pub trait StatusObserver: Send + Sync {
    /// Receive one status transition.
    fn on_status(&self, update: &StatusUpdate);
}

/// Observer that discards all updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl StatusObserver for NoOpObserver {
    fn on_status(&self, _update: &StatusUpdate) {}
}

/// Observer that records every update, for tests and debugging.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    updates: Mutex<Vec<StatusUpdate>>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all updates seen so far, in arrival order.
    pub fn updates(&self) -> Vec<StatusUpdate> {
        self.updates.lock().expect("observer lock poisoned").clone()
    }

    /// The most recent step, if any update arrived.
    pub fn last_step(&self) -> Option<Step> {
        self.updates
            .lock()
            .expect("observer lock poisoned")
            .last()
            .map(|u| u.step)
    }
}

impl StatusObserver for RecordingObserver {
    fn on_status(&self, update: &StatusUpdate) {
        self.updates
            .lock()
            .expect("observer lock poisoned")
            .push(update.clone());
    }
}
