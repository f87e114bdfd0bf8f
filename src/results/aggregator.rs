//! Result aggregator actor.
//!
//! One aggregator per attempt. It owns the [`AggregationState`] exclusively;
//! producers reach it only through an [`AggregatorHandle`], so the two
//! deliveries can race without a lock and the finalize check always sees a
//! consistent state.

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::{Exercise, RunOutcome, TestCaseResult, ValidationResult};
use crate::error::{Result, TmcError};
use crate::results::render::RenderDispatcher;
use crate::results::state::{AggregationState, AggregatorMsg, SubmissionCallback};

/// Mailbox size used when no configuration says otherwise
pub const DEFAULT_MAILBOX_CAPACITY: usize = 32;

/// Sending side of one attempt's aggregator. Cheap to clone.
///
/// Messages sent through one handle are applied in send order.
#[derive(Debug, Clone)]
pub struct AggregatorHandle {
    exercise: String,
    tx: mpsc::Sender<AggregatorMsg>,
}

impl AggregatorHandle {
    pub fn exercise_name(&self) -> &str {
        &self.exercise
    }

    /// Record the code style result
    pub async fn deliver_validation_result(&self, result: ValidationResult) -> Result<()> {
        self.send(AggregatorMsg::ValidationResult(result)).await
    }

    /// Record the test run outcome. A failed build finalizes the attempt
    /// without waiting for the style result.
    pub async fn deliver_test_run_outcome(&self, outcome: RunOutcome) -> Result<()> {
        self.send(AggregatorMsg::TestRunOutcome(outcome)).await
    }

    /// Record already normalized per test case results
    pub async fn deliver_test_results(&self, results: Vec<TestCaseResult>) -> Result<()> {
        self.send(AggregatorMsg::TestResults(results)).await
    }

    pub async fn set_submission_callback(&self, callback: SubmissionCallback) -> Result<()> {
        self.send(AggregatorMsg::SubmissionCallback(callback)).await
    }

    pub async fn set_returnable(&self, returnable: bool) -> Result<()> {
        self.send(AggregatorMsg::Returnable(returnable)).await
    }

    async fn send(&self, msg: AggregatorMsg) -> Result<()> {
        self.tx
            .send(msg)
            .await
            .map_err(|_| TmcError::AggregatorClosed(self.exercise.clone()))
    }
}

/// The task that owns one attempt's state.
pub struct ResultAggregator {
    state: AggregationState,
    rx: mpsc::Receiver<AggregatorMsg>,
    dispatcher: RenderDispatcher,
}

impl ResultAggregator {
    /// Start an aggregator for a fresh attempt at `exercise`.
    ///
    /// The task runs until every handle is dropped. Its join value is the
    /// submittable verdict, or `None` if the attempt never finalized.
    pub fn spawn(
        exercise: Exercise,
        dispatcher: RenderDispatcher,
        capacity: usize,
    ) -> (AggregatorHandle, JoinHandle<Option<bool>>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = AggregatorHandle {
            exercise: exercise.name.clone(),
            tx,
        };
        let aggregator = Self {
            state: AggregationState::new(exercise),
            rx,
            dispatcher,
        };
        (handle, tokio::spawn(aggregator.run()))
    }

    async fn run(mut self) -> Option<bool> {
        let mut verdict = None;

        while let Some(msg) = self.rx.recv().await {
            tracing::trace!(
                exercise = %self.state.exercise().name,
                kind = msg.kind(),
                "Aggregator message"
            );

            let Some(results) = self.state.apply(msg, Utc::now()) else {
                continue;
            };

            tracing::info!(
                exercise = %results.exercise.name,
                tests = results.test_results.len(),
                submittable = results.submittable,
                "Attempt finalized"
            );
            verdict = Some(results.submittable);

            if let Err(e) = self.dispatcher.dispatch(results) {
                tracing::error!(
                    exercise = %self.state.exercise().name,
                    error = %e,
                    "Failed to hand results to the render thread"
                );
            }
        }

        if verdict.is_none() {
            tracing::debug!(
                exercise = %self.state.exercise().name,
                tests_received = self.state.tests_received(),
                validation_received = self.state.validation_received(),
                "Attempt closed before it finalized"
            );
        }
        verdict
    }
}
