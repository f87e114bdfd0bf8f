//! Per-attempt aggregation state machine.
//!
//! Pure and synchronous: the aggregator actor owns one of these per attempt
//! and feeds it messages in arrival order.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{Exercise, RunOutcome, TestCaseResult, ValidationResult};
use crate::results::build_log::build_failure_result;
use crate::results::submission::is_submittable;

/// Invoked by the result view when the user chooses to submit.
pub type SubmissionCallback = Arc<dyn Fn() + Send + Sync>;

/// A message addressed to one attempt's aggregator.
pub enum AggregatorMsg {
    /// Code style run finished
    ValidationResult(ValidationResult),
    /// Test run finished, possibly with a failed build
    TestRunOutcome(RunOutcome),
    /// Per test case results, already normalized
    TestResults(Vec<TestCaseResult>),
    /// Callback offered to the user alongside the results
    SubmissionCallback(SubmissionCallback),
    /// Whether the server accepts submissions for this attempt
    Returnable(bool),
}

impl AggregatorMsg {
    pub fn kind(&self) -> &'static str {
        match self {
            AggregatorMsg::ValidationResult(_) => "validation result",
            AggregatorMsg::TestRunOutcome(_) => "test run outcome",
            AggregatorMsg::TestResults(_) => "test results",
            AggregatorMsg::SubmissionCallback(_) => "submission callback",
            AggregatorMsg::Returnable(_) => "returnable flag",
        }
    }
}

impl fmt::Debug for AggregatorMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregatorMsg::ValidationResult(v) => f.debug_tuple("ValidationResult").field(v).finish(),
            AggregatorMsg::TestRunOutcome(o) => f.debug_tuple("TestRunOutcome").field(o).finish(),
            AggregatorMsg::TestResults(r) => f.debug_tuple("TestResults").field(r).finish(),
            AggregatorMsg::SubmissionCallback(_) => f.write_str("SubmissionCallback(..)"),
            AggregatorMsg::Returnable(r) => f.debug_tuple("Returnable").field(r).finish(),
        }
    }
}

/// Everything the result view needs for one finished attempt.
#[derive(Clone)]
pub struct AttemptResults {
    pub exercise: Exercise,
    /// Real test results, or one synthetic failure for a failed build
    pub test_results: Vec<TestCaseResult>,
    /// Absent when the build failed before style results arrived
    pub validation: Option<ValidationResult>,
    pub submission_callback: Option<SubmissionCallback>,
    pub submittable: bool,
}

impl fmt::Debug for AttemptResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttemptResults")
            .field("exercise", &self.exercise.name)
            .field("test_results", &self.test_results)
            .field("validation", &self.validation)
            .field("has_submission_callback", &self.submission_callback.is_some())
            .field("submittable", &self.submittable)
            .finish()
    }
}

/// State of one attempt, from creation until it finalizes.
pub struct AggregationState {
    exercise: Exercise,
    test_results: Vec<TestCaseResult>,
    validation: Option<ValidationResult>,
    tests_received: bool,
    validation_received: bool,
    short_circuited: bool,
    finalized: bool,
    returnable: bool,
    submission_callback: Option<SubmissionCallback>,
}

impl AggregationState {
    /// Fresh state. Not returnable until told otherwise.
    pub fn new(exercise: Exercise) -> Self {
        Self {
            exercise,
            test_results: Vec::new(),
            validation: None,
            tests_received: false,
            validation_received: false,
            short_circuited: false,
            finalized: false,
            returnable: false,
            submission_callback: None,
        }
    }

    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    pub fn tests_received(&self) -> bool {
        self.tests_received
    }

    pub fn validation_received(&self) -> bool {
        self.validation_received
    }

    pub fn is_short_circuited(&self) -> bool {
        self.short_circuited
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Enough is known to show results: a failed build, or both inputs
    pub fn is_ready(&self) -> bool {
        self.short_circuited || (self.tests_received && self.validation_received)
    }

    /// Apply one message. Returns the results exactly once, on the message
    /// that makes the attempt ready; afterwards every message is ignored.
    pub fn apply(&mut self, msg: AggregatorMsg, now: DateTime<Utc>) -> Option<AttemptResults> {
        if self.finalized {
            log::debug!(
                "Ignoring {} for {}: attempt already finalized",
                msg.kind(),
                self.exercise.name
            );
            return None;
        }

        match msg {
            AggregatorMsg::ValidationResult(result) => self.record_validation(result),
            AggregatorMsg::TestRunOutcome(outcome) => self.record_run_outcome(outcome),
            AggregatorMsg::TestResults(results) => self.record_test_results(results),
            AggregatorMsg::SubmissionCallback(callback) => {
                self.submission_callback = Some(callback);
                return None;
            }
            AggregatorMsg::Returnable(returnable) => {
                self.returnable = returnable;
                return None;
            }
        }

        self.finalize_if_ready(now)
    }

    fn record_validation(&mut self, result: ValidationResult) {
        if self.validation_received {
            log::warn!(
                "Validation result delivered twice for {}, keeping the latest",
                self.exercise.name
            );
        }
        self.validation = Some(result);
        self.validation_received = true;
    }

    fn record_test_results(&mut self, results: Vec<TestCaseResult>) {
        if self.tests_received {
            log::warn!(
                "Test results delivered twice for {}, keeping the latest",
                self.exercise.name
            );
        }
        self.test_results = results;
        self.tests_received = true;
    }

    fn record_run_outcome(&mut self, outcome: RunOutcome) {
        match build_failure_result(&outcome) {
            Some(synthetic) => {
                log::info!("{} for {}", synthetic.name, self.exercise.name);
                self.record_test_results(vec![synthetic]);
                self.short_circuited = true;
            }
            None => {
                if let RunOutcome::Completed { test_results, .. } = outcome {
                    self.record_test_results(test_results);
                }
            }
        }
    }

    fn finalize_if_ready(&mut self, now: DateTime<Utc>) -> Option<AttemptResults> {
        if !self.is_ready() {
            return None;
        }
        self.finalized = true;

        let submittable = is_submittable(
            &self.exercise,
            &self.test_results,
            self.validation.as_ref(),
            self.returnable,
            now,
        );

        Some(AttemptResults {
            exercise: self.exercise.clone(),
            test_results: self.test_results.clone(),
            validation: self.validation.clone(),
            submission_callback: self.submission_callback.clone(),
            submittable,
        })
    }
}
