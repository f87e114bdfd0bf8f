//! Raw outcome of a local test run.
//!
//! The aggregator normalizes this into test case results; nothing downstream
//! of it ever sees the raw shape.

use serde::{Deserialize, Serialize};

use super::test_result::TestCaseResult;

/// Output captured from the build and test process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunLogs {
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
}

impl RunLogs {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: Some(stdout.into()),
            stderr: Some(stderr.into()),
        }
    }

    pub fn stdout_only(stdout: impl Into<String>) -> Self {
        Self {
            stdout: Some(stdout.into()),
            stderr: None,
        }
    }
}

/// What the test runner reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunOutcome {
    /// Tests compiled and ran; individual cases may still have failed
    Completed {
        test_results: Vec<TestCaseResult>,
        #[serde(default)]
        logs: RunLogs,
    },
    /// The exercise or its tests did not compile
    CompileFailed {
        #[serde(default)]
        logs: RunLogs,
    },
    /// The test process was killed or timed out
    TestrunInterrupted {
        #[serde(default)]
        logs: RunLogs,
    },
}

impl RunOutcome {
    pub fn logs(&self) -> &RunLogs {
        match self {
            RunOutcome::Completed { logs, .. }
            | RunOutcome::CompileFailed { logs }
            | RunOutcome::TestrunInterrupted { logs } => logs,
        }
    }

    /// Label shown to the user when the build itself failed.
    /// `None` for a run that produced test results.
    pub fn build_failure_label(&self) -> Option<&'static str> {
        match self {
            RunOutcome::Completed { .. } => None,
            RunOutcome::CompileFailed { .. } => Some("Compilation failed"),
            RunOutcome::TestrunInterrupted { .. } => Some("Testrun interrupted"),
        }
    }

    pub fn is_build_failure(&self) -> bool {
        self.build_failure_label().is_some()
    }
}
