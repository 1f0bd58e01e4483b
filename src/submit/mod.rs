//! Submission retry engine.
//!
//! Delivers a result payload to the webhook with bounded exponential
//! backoff. The engine is an explicit state machine:
//!
//! ```text
//! Pending → Submitting → Completed
//!               ↓ ↑
//!         RetryScheduled ──(cap reached)──→ Exhausted
//! ```
//!
//! Transport failures are treated uniformly (no status-code taxonomy):
//! any non-success resolution counts as one failed attempt. Each attempt's
//! resolution is reported synchronously to the status observer. Each run
//! owns its own counters; nothing is shared across concurrent submissions.

pub mod policy;
pub mod timer;

pub use policy::{RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS};
pub use timer::{RecordingTimer, RetryTimer, TokioTimer};

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::types::{StatusObserver, StatusUpdate, Step, SubmissionPayload};
use crate::webhook::WebhookTransport;

/// Error type for a single delivery attempt.
///
/// Expected and transient: the engine counts these against the retry cap
/// rather than propagating them.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// The request never resolved to a response.
    #[error("Network failure: {0}")]
    Network(String),
    /// The endpoint resolved but did not accept the payload.
    #[error("Webhook rejected submission: {0}")]
    Rejected(String),
}

/// Terminal error once every allowed attempt has failed.
#[derive(Debug, thiserror::Error)]
#[error("Submission failed after {failed_attempts} attempts: {last_error}")]
pub struct SubmissionExhausted {
    /// Count of failed attempts (equals the policy's attempt cap).
    pub failed_attempts: u32,
    /// The error from the final attempt.
    #[source]
    pub last_error: TransportError,
}

/// State of a submission flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// Not yet started.
    Pending,
    /// An attempt is in flight.
    Submitting,
    /// Last attempt failed; a retry timer is pending.
    RetryScheduled,
    /// Terminal: the webhook accepted the payload.
    Completed,
    /// Terminal: the retry cap was reached.
    Exhausted,
}

impl SubmissionState {
    /// True for states with no further automatic transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Exhausted)
    }

    /// Transition to `next`, logging the edge. Terminal states are final.
    fn transition(&mut self, next: SubmissionState) {
        debug_assert!(!self.is_terminal(), "no transition leaves {:?}", self);
        debug!(from = ?self, to = ?next, "submission state transition");
        *self = next;
    }
}

/// Resolution of one delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The webhook accepted the payload.
    Success,
    /// The attempt failed and was counted against the cap.
    Failure,
}

/// Transient record of one attempt, retained in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    /// 1-based attempt number.
    pub attempt: u32,
    /// How the attempt resolved.
    pub outcome: AttemptOutcome,
    /// Backoff scheduled after this attempt, if a retry followed.
    pub scheduled_delay: Option<Duration>,
}

/// Outcome of a completed submission run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    /// Terminal state reached (always `Completed` on the `Ok` path).
    pub state: SubmissionState,
    /// Every attempt, in order.
    pub attempts: Vec<AttemptRecord>,
    /// Count of failed attempts before success.
    pub retry_count: u32,
}

/// Bounded-backoff delivery engine.
///
/// Generic over the transport and timer seams so the retry schedule is
/// testable with scripted failures and no real sleeping.
pub struct SubmissionEngine<T, R = TokioTimer> {
    transport: T,
    timer: R,
    policy: RetryPolicy,
}

impl<T: WebhookTransport> SubmissionEngine<T, TokioTimer> {
    /// Create an engine with the tokio timer and a policy.
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self::with_timer(transport, TokioTimer, policy)
    }
}

impl<T: WebhookTransport, R: RetryTimer> SubmissionEngine<T, R> {
    /// Create an engine with an explicit timer.
    pub fn with_timer(transport: T, timer: R, policy: RetryPolicy) -> Self {
        Self {
            transport,
            timer,
            policy,
        }
    }

    /// The configured policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Deliver `payload` to `url`, retrying per policy.
    ///
    /// Runs to a terminal state: `Ok(report)` on first success at any
    /// attempt, `Err(SubmissionExhausted)` once the count of failed
    /// attempts reaches the cap. There is no external abort; cancellation
    /// would be honored here, at the scheduled-retry boundary, if added.
    pub async fn submit(
        &self,
        url: &str,
        bearer_token: &str,
        payload: &SubmissionPayload,
        observer: &dyn StatusObserver,
    ) -> Result<SubmissionReport, SubmissionExhausted> {
        let mut state = SubmissionState::Pending;
        let mut attempts: Vec<AttemptRecord> = Vec::new();
        let mut retry_count: u32 = 0;

        loop {
            state.transition(SubmissionState::Submitting);
            let attempt = retry_count + 1;
            let message = if retry_count == 0 {
                "Submitting results...".to_string()
            } else {
                format!(
                    "Retrying submission ({retry_count}/{})...",
                    self.policy.max_retries()
                )
            };
            observer.on_status(
                &StatusUpdate::new(Step::Submitting, message).with_retry_count(retry_count),
            );
            info!(attempt, url, "submitting result payload");

            match self.transport.deliver(url, bearer_token, payload).await {
                Ok(()) => {
                    state.transition(SubmissionState::Completed);
                    attempts.push(AttemptRecord {
                        attempt,
                        outcome: AttemptOutcome::Success,
                        scheduled_delay: None,
                    });
                    info!(attempt, "webhook accepted submission");
                    observer.on_status(
                        &StatusUpdate::new(Step::Completed, "Results submitted successfully!")
                            .with_retry_count(retry_count),
                    );
                    return Ok(SubmissionReport {
                        state,
                        attempts,
                        retry_count,
                    });
                }
                Err(err) => {
                    retry_count += 1;
                    if retry_count < self.policy.max_attempts {
                        state.transition(SubmissionState::RetryScheduled);
                        let delay = self.policy.backoff_for(retry_count);
                        attempts.push(AttemptRecord {
                            attempt,
                            outcome: AttemptOutcome::Failure,
                            scheduled_delay: Some(delay),
                        });
                        warn!(
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %err,
                            "submission attempt failed, retry scheduled"
                        );
                        observer.on_status(
                            &StatusUpdate::new(
                                Step::Submitting,
                                format!(
                                    "Submission failed. Retrying in {:.0?}...",
                                    delay
                                ),
                            )
                            .with_details(err.to_string())
                            .with_retry_count(retry_count),
                        );
                        self.timer.wait(delay).await;
                    } else {
                        state.transition(SubmissionState::Exhausted);
                        attempts.push(AttemptRecord {
                            attempt,
                            outcome: AttemptOutcome::Failure,
                            scheduled_delay: None,
                        });
                        warn!(attempt, error = %err, "retries exhausted");
                        observer.on_status(
                            &StatusUpdate::new(
                                Step::Error,
                                "Failed to submit after maximum retries",
                            )
                            .with_details(err.to_string())
                            .with_retry_count(retry_count),
                        );
                        return Err(SubmissionExhausted {
                            failed_attempts: retry_count,
                            last_error: err,
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MutualPair, NoOpObserver, QueryOutcome, RecordingObserver, UserId};
    use crate::webhook::test_support::ScriptedTransport;

    fn payload() -> SubmissionPayload {
        SubmissionPayload::new(
            "REG12347",
            QueryOutcome::MutualPairs(vec![MutualPair::new(UserId::new(1), UserId::new(2))]),
        )
    }

    fn unit_policy() -> RetryPolicy {
        RetryPolicy::new(4, Duration::from_secs(1))
    }

    #[tokio::test]
    async fn first_attempt_success_needs_no_timer() {
        let transport = ScriptedTransport::failing_first(0);
        let timer = RecordingTimer::new();
        let engine = SubmissionEngine::with_timer(transport, timer, unit_policy());

        let report = engine
            .submit("https://example.test/hook", "token", &payload(), &NoOpObserver)
            .await
            .unwrap();

        assert_eq!(report.state, SubmissionState::Completed);
        assert_eq!(report.retry_count, 0);
        assert_eq!(report.attempts.len(), 1);
        assert_eq!(report.attempts[0].outcome, AttemptOutcome::Success);
        assert_eq!(engine.timer.delays(), Vec::<Duration>::new());
    }

    #[tokio::test]
    async fn success_on_fourth_attempt_schedules_three_backoffs() {
        let transport = ScriptedTransport::failing_first(3);
        let timer = RecordingTimer::new();
        let engine = SubmissionEngine::with_timer(transport, timer, unit_policy());
        let observer = RecordingObserver::new();

        let report = engine
            .submit("https://example.test/hook", "token", &payload(), &observer)
            .await
            .unwrap();

        assert_eq!(report.retry_count, 3);
        assert_eq!(
            engine.timer.delays(),
            vec![
                Duration::from_secs(2),
                Duration::from_secs(4),
                Duration::from_secs(8),
            ]
        );
        assert_eq!(observer.last_step(), Some(Step::Completed));
    }

    #[tokio::test]
    async fn all_failures_exhaust_at_the_cap_with_no_further_scheduling() {
        let transport = ScriptedTransport::always_failing();
        let timer = RecordingTimer::new();
        let engine = SubmissionEngine::with_timer(transport, timer, unit_policy());
        let observer = RecordingObserver::new();

        let err = engine
            .submit("https://example.test/hook", "token", &payload(), &observer)
            .await
            .unwrap_err();

        assert_eq!(err.failed_attempts, 4);
        // Three backoffs were scheduled; the fourth failure is terminal.
        assert_eq!(engine.timer.delays().len(), 3);
        let last = observer.updates().pop().unwrap();
        assert_eq!(last.step, Step::Error);
        assert_eq!(last.retry_count, Some(4));
    }

    #[tokio::test]
    async fn attempt_records_carry_the_schedule() {
        let transport = ScriptedTransport::failing_first(1);
        let engine =
            SubmissionEngine::with_timer(transport, RecordingTimer::new(), unit_policy());

        let report = engine
            .submit("https://example.test/hook", "token", &payload(), &NoOpObserver)
            .await
            .unwrap();

        assert_eq!(report.attempts.len(), 2);
        assert_eq!(report.attempts[0].outcome, AttemptOutcome::Failure);
        assert_eq!(
            report.attempts[0].scheduled_delay,
            Some(Duration::from_secs(2))
        );
        assert_eq!(report.attempts[1].outcome, AttemptOutcome::Success);
        assert_eq!(report.attempts[1].scheduled_delay, None);
    }

    #[tokio::test]
    async fn single_attempt_policy_never_retries() {
        let transport = ScriptedTransport::always_failing();
        let timer = RecordingTimer::new();
        let engine = SubmissionEngine::with_timer(
            transport,
            timer,
            RetryPolicy::new(1, Duration::from_secs(1)),
        );

        let err = engine
            .submit("https://example.test/hook", "token", &payload(), &NoOpObserver)
            .await
            .unwrap_err();

        assert_eq!(err.failed_attempts, 1);
        assert!(engine.timer.delays().is_empty());
    }
}
