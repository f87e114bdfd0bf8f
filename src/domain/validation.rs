//! Code style validation results.

use serde::{Deserialize, Serialize};

/// How strictly style findings are enforced for a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Strategy {
    /// Style checks are not run
    Disabled,
    /// Findings are shown but never block submission
    Warn,
    /// Any finding blocks submission
    Fail,
}

/// One style finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub file: String,
    pub line: u32,
    pub message: String,
}

impl ValidationError {
    pub fn new(file: impl Into<String>, line: u32, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            message: message.into(),
        }
    }
}

/// Result of a code style run. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub strategy: Strategy,
    #[serde(default)]
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a result with no findings
    pub fn clean(strategy: Strategy) -> Self {
        Self {
            strategy,
            errors: Vec::new(),
        }
    }

    /// Create a result with findings
    pub fn with_errors(strategy: Strategy, errors: Vec<ValidationError>) -> Self {
        Self { strategy, errors }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether these findings stand in the way of submitting.
    /// Only the FAIL strategy ever blocks.
    pub fn blocks_submission(&self) -> bool {
        self.strategy == Strategy::Fail && self.has_errors()
    }
}
