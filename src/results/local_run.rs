//! Local test run orchestration.
//!
//! Starts the test run and the code style run for one exercise in the
//! background and feeds whatever they produce into a fresh aggregator.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::{AbortHandle, JoinHandle};

use crate::background::{BackgroundTaskRunner, BgHandle, TaskOutcome};
use crate::domain::{Exercise, RunOutcome, ValidationResult};
use crate::error::{Result, TmcError};
use crate::results::aggregator::{AggregatorHandle, DEFAULT_MAILBOX_CAPACITY, ResultAggregator};
use crate::results::render::RenderDispatcher;
use crate::results::state::SubmissionCallback;

/// Description of the code style background task
pub const CODE_STYLE_TASK: &str = "Running code style validations";

/// The language tooling that actually builds, tests and checks an exercise
#[async_trait]
pub trait ExerciseTooling: Send + Sync + 'static {
    /// Compile the exercise and run its tests
    async fn run_tests(&self, exercise: &Exercise) -> Result<RunOutcome>;

    /// Run the code style checker
    async fn run_code_style(&self, exercise: &Exercise) -> Result<ValidationResult>;
}

/// Handle to one running attempt.
pub struct AttemptHandle {
    exercise: String,
    tests: AbortHandle,
    code_style: AbortHandle,
    forwarder: JoinHandle<()>,
    verdict: JoinHandle<Option<bool>>,
}

impl AttemptHandle {
    pub fn exercise_name(&self) -> &str {
        &self.exercise
    }

    pub fn cancel_tests(&self) {
        self.tests.abort();
    }

    pub fn cancel_code_style(&self) {
        self.code_style.abort();
    }

    pub fn cancel(&self) {
        self.cancel_tests();
        self.cancel_code_style();
    }

    /// Wait until both producers have ended and the aggregator has drained.
    ///
    /// Returns the submittable verdict, or `None` when the attempt never
    /// finalized (a producer failed or was cancelled).
    pub async fn finished(self) -> Result<Option<bool>> {
        let exercise = &self.exercise;
        let forwarder = self.forwarder;
        let verdict = self.verdict;

        let forwarded = async move {
            forwarder
                .await
                .map_err(|e| TmcError::TaskPanicked(format!("outcome forwarder for {}: {}", exercise, e)))
        };
        let aggregated = async move {
            verdict
                .await
                .map_err(|e| TmcError::TaskPanicked(format!("aggregator for {}: {}", exercise, e)))
        };

        let ((), verdict) = futures::future::try_join(forwarded, aggregated).await?;
        Ok(verdict)
    }
}

/// Runs tests and style checks locally and joins their results.
pub struct LocalTestRun<R: BackgroundTaskRunner, T: ExerciseTooling> {
    runner: R,
    tooling: Arc<T>,
    dispatcher: RenderDispatcher,
    mailbox_capacity: usize,
}

impl<R: BackgroundTaskRunner, T: ExerciseTooling> LocalTestRun<R, T> {
    pub fn new(runner: R, tooling: Arc<T>, dispatcher: RenderDispatcher) -> Self {
        Self {
            runner,
            tooling,
            dispatcher,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
        }
    }

    /// Set the aggregator mailbox size (builder pattern)
    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity;
        self
    }

    /// Whether running tests locally is offered for `exercise`.
    /// The deadline is deliberately not considered here.
    pub fn enabled_for(exercise: &Exercise) -> bool {
        exercise.run_tests_locally_enabled && exercise.returnable
    }

    /// Start a new attempt. Every call gets its own aggregator.
    pub async fn start(
        &self,
        exercise: Exercise,
        submission_callback: Option<SubmissionCallback>,
    ) -> Result<AttemptHandle> {
        let (aggregator, verdict) =
            ResultAggregator::spawn(exercise.clone(), self.dispatcher.clone(), self.mailbox_capacity);

        aggregator.set_returnable(exercise.returnable).await?;
        if let Some(callback) = submission_callback {
            aggregator.set_submission_callback(callback).await?;
        }

        let tooling = self.tooling.clone();
        let target = exercise.clone();
        let tests = self.runner.run(format!("Running tests for {}", exercise.name), async move {
            tooling.run_tests(&target).await
        });

        let tooling = self.tooling.clone();
        let target = exercise.clone();
        let code_style = self.runner.run(CODE_STYLE_TASK, async move {
            tooling.run_code_style(&target).await
        });

        let attempt = AttemptHandle {
            exercise: exercise.name,
            tests: tests.abort_handle(),
            code_style: code_style.abort_handle(),
            forwarder: tokio::spawn(forward_outcomes(aggregator, tests, code_style)),
            verdict,
        };
        Ok(attempt)
    }
}

/// Deliver each producer's outcome as soon as it arrives.
async fn forward_outcomes(
    aggregator: AggregatorHandle,
    tests: BgHandle<RunOutcome>,
    code_style: BgHandle<ValidationResult>,
) {
    let tests = tests.outcome();
    let code_style = code_style.outcome();
    tokio::pin!(tests);
    tokio::pin!(code_style);

    let mut tests_done = false;
    let mut code_style_done = false;

    while !(tests_done && code_style_done) {
        tokio::select! {
            outcome = &mut tests, if !tests_done => {
                tests_done = true;
                forward_test_outcome(&aggregator, outcome).await;
            }
            outcome = &mut code_style, if !code_style_done => {
                code_style_done = true;
                forward_code_style_outcome(&aggregator, outcome).await;
            }
        }
    }
}

async fn forward_test_outcome(aggregator: &AggregatorHandle, outcome: TaskOutcome<RunOutcome>) {
    let exercise = aggregator.exercise_name();
    match outcome {
        TaskOutcome::Ready(run) => {
            if let Err(e) = aggregator.deliver_test_run_outcome(run).await {
                tracing::warn!(exercise = %exercise, error = %e, "Could not deliver test run outcome");
            }
        }
        TaskOutcome::Cancelled => tracing::debug!(exercise = %exercise, "Test run cancelled"),
        TaskOutcome::Failed(e) => tracing::warn!(exercise = %exercise, error = %e, "Test run failed"),
    }
}

async fn forward_code_style_outcome(aggregator: &AggregatorHandle, outcome: TaskOutcome<ValidationResult>) {
    let exercise = aggregator.exercise_name();
    match outcome {
        TaskOutcome::Ready(result) => {
            if let Err(e) = aggregator.deliver_validation_result(result).await {
                tracing::warn!(exercise = %exercise, error = %e, "Could not deliver code style result");
            }
        }
        TaskOutcome::Cancelled => tracing::debug!(exercise = %exercise, "Code style run cancelled"),
        TaskOutcome::Failed(e) => tracing::warn!(exercise = %exercise, error = %e, "Code style run failed"),
    }
}
