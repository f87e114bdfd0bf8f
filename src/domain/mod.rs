//! Domain types for tmcrun
//!
//! This module contains the values that flow between producers, the result
//! aggregator and the notifier:
//! - Exercise: read-only catalog entry (deadline, completion, permissions)
//! - TestCaseResult: outcome of one test case
//! - ValidationResult: code style findings plus the course's strategy
//! - RunOutcome: raw signal from the test runner, before normalization

pub mod exercise;
pub mod run_outcome;
pub mod test_result;
pub mod validation;

pub use exercise::Exercise;
pub use run_outcome::{RunLogs, RunOutcome};
pub use test_result::TestCaseResult;
pub use validation::{Strategy, ValidationError, ValidationResult};
