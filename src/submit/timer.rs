//! Timer seam for scheduled retries.
//!
//! Retries are deferred, not busy-waited, so the single-threaded scheduler
//! stays free for other work between attempts. Injecting the timer keeps
//! the engine's delay schedule testable without real sleeping.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Async timer the engine awaits before each scheduled retry.
#[async_trait]
pub trait RetryTimer: Send + Sync {
    /// Suspend the calling flow for `delay`.
    async fn wait(&self, delay: Duration);
}

#[async_trait]
impl<T: RetryTimer + ?Sized> RetryTimer for std::sync::Arc<T> {
    async fn wait(&self, delay: Duration) {
        (**self).wait(delay).await;
    }
}

/// Production timer backed by the tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[async_trait]
impl RetryTimer for TokioTimer {
    async fn wait(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Timer that records every requested delay and returns immediately,
/// for tests and debugging.
#[derive(Debug, Default)]
pub struct RecordingTimer {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingTimer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every delay requested so far, in scheduling order.
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().expect("timer lock poisoned").clone()
    }
}

#[async_trait]
impl RetryTimer for RecordingTimer {
    async fn wait(&self, delay: Duration) {
        self.delays.lock().expect("timer lock poisoned").push(delay);
    }
}
