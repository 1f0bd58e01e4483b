//! Relay flow orchestration.
//!
//! One flow run: fetch the handshake, resolve the dataset shape, run the
//! matching query, submit the result through the retry engine. Status
//! transitions are published to the observer at every phase; algorithmic
//! errors abort the whole flow fail-fast with no partial results, while
//! transport errors stay contained inside the retry engine until exhausted.

use tracing::{error, info};

use crate::graph::FollowsGraph;
use crate::query::{find_mutual_pairs, find_nth_level};
use crate::source::{DatasetSource, RegistrationRequest, SourceError};
use crate::submit::{
    RetryPolicy, RetryTimer, SubmissionEngine, SubmissionExhausted, SubmissionReport, TokioTimer,
};
use crate::types::{
    DatasetShape, ProcessingError, QueryOutcome, StatusObserver, StatusUpdate, Step,
    SubmissionPayload,
};
use crate::webhook::WebhookTransport;

/// Error type for a flow run.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// The dataset fetch failed; nothing was processed.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// The dataset was malformed; nothing was submitted.
    #[error(transparent)]
    Processing(#[from] ProcessingError),
    /// Every submission attempt failed.
    #[error(transparent)]
    Exhausted(#[from] SubmissionExhausted),
}

/// Result of a successful flow run.
#[derive(Debug, Clone)]
pub struct RelayOutcome {
    /// The payload that was delivered.
    pub payload: SubmissionPayload,
    /// The submission report (attempt history, retry count).
    pub report: SubmissionReport,
}

/// Orchestrator tying source, queries, and submission together.
///
/// Generic over the source, transport, and timer seams; the concrete
/// reqwest-backed pair lives behind the `http` feature.
pub struct RelayFlow<S, T, R = TokioTimer> {
    source: S,
    engine: SubmissionEngine<T, R>,
    registration: RegistrationRequest,
}

impl<S: DatasetSource, T: WebhookTransport> RelayFlow<S, T, TokioTimer> {
    /// Create a flow with the default retry policy and tokio timer.
    pub fn new(source: S, transport: T, registration: RegistrationRequest) -> Self {
        Self {
            source,
            engine: SubmissionEngine::new(transport, RetryPolicy::default()),
            registration,
        }
    }
}

impl<S: DatasetSource, T: WebhookTransport, R: RetryTimer> RelayFlow<S, T, R> {
    /// Create a flow around an explicit engine.
    pub fn with_engine(source: S, engine: SubmissionEngine<T, R>, registration: RegistrationRequest) -> Self {
        Self {
            source,
            engine,
            registration,
        }
    }

    /// Run one flow to its terminal state.
    ///
    /// Each run owns its own attempt counter and status; concurrent runs
    /// share nothing. There is no external abort: the flow ends either
    /// completed or failed.
    pub async fn run(&self, observer: &dyn StatusObserver) -> Result<RelayOutcome, FlowError> {
        observer.on_status(&StatusUpdate::new(Step::Init, "Starting relay flow"));

        observer.on_status(&StatusUpdate::new(Step::Fetching, "Requesting webhook..."));
        let handshake = match self.source.fetch(&self.registration).await {
            Ok(handshake) => handshake,
            Err(e) => {
                error!(error = %e, "dataset fetch failed");
                observer.on_status(
                    &StatusUpdate::new(Step::Error, "Failed to fetch dataset")
                        .with_details(e.to_string()),
                );
                return Err(e.into());
            }
        };
        info!(
            webhook = %handshake.webhook,
            question = ?handshake.question,
            "handshake received"
        );

        observer.on_status(&StatusUpdate::new(Step::Processing, "Processing data..."));
        let shape = match DatasetShape::resolve(&handshake.data, handshake.question) {
            Ok(shape) => shape,
            Err(e) => {
                error!(error = %e, "dataset resolution failed");
                observer.on_status(
                    &StatusUpdate::new(Step::Error, "Failed to process data")
                        .with_details(e.to_string()),
                );
                return Err(e.into());
            }
        };

        let outcome = run_query(&shape);
        info!(
            question = shape.question(),
            results = outcome.len(),
            "query complete"
        );

        let payload = SubmissionPayload::new(self.registration.reg_no.clone(), outcome);
        let report = self
            .engine
            .submit(
                &handshake.webhook,
                &handshake.access_token,
                &payload,
                observer,
            )
            .await?;

        Ok(RelayOutcome { payload, report })
    }
}

/// Run the query a resolved shape requests.
///
/// Pure and synchronous; exposed for callers that already hold a shape.
pub fn run_query(shape: &DatasetShape) -> QueryOutcome {
    let graph = FollowsGraph::from_users(shape.users());
    match shape {
        DatasetShape::MutualPairs(_) => QueryOutcome::MutualPairs(find_mutual_pairs(&graph)),
        DatasetShape::Reachability(req) => {
            QueryOutcome::Reachability(find_nth_level(&graph, req.find_id, req.n))
        }
    }
}
