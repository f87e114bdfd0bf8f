//! Submission eligibility.

use chrono::{DateTime, Utc};

use crate::domain::{Exercise, TestCaseResult, ValidationResult};

/// Whether an attempt may be sent to the server for grading.
///
/// All of these must hold: the deadline has not passed, every test case
/// succeeded, style findings do not block (only FAIL with findings blocks),
/// and the caller marked the attempt returnable.
pub fn is_submittable(
    exercise: &Exercise,
    test_results: &[TestCaseResult],
    validation: Option<&ValidationResult>,
    returnable: bool,
    now: DateTime<Utc>,
) -> bool {
    if exercise.has_deadline_passed_at(now) {
        return false;
    }

    if test_results.iter().any(|result| !result.successful) {
        return false;
    }

    if validation.is_some_and(ValidationResult::blocks_submission) {
        return false;
    }

    returnable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Strategy, ValidationError};
    use chrono::Duration;

    fn passing() -> Vec<TestCaseResult> {
        vec![TestCaseResult::pass("A a"), TestCaseResult::pass("A b")]
    }

    fn findings(strategy: Strategy) -> ValidationResult {
        ValidationResult::with_errors(strategy, vec![ValidationError::new("A.java", 1, "Missing javadoc")])
    }

    #[test]
    fn test_all_good_is_submittable() {
        let now = Utc::now();
        let ex = Exercise::new("a").with_deadline(now + Duration::days(1));
        let validation = ValidationResult::clean(Strategy::Fail);
        assert!(is_submittable(&ex, &passing(), Some(&validation), true, now));
    }

    #[test]
    fn test_deadline_passed_wins_over_everything() {
        let now = Utc::now();
        let ex = Exercise::new("a").with_deadline(now - Duration::seconds(1));
        let validation = ValidationResult::clean(Strategy::Disabled);
        assert!(!is_submittable(&ex, &passing(), Some(&validation), true, now));
        assert!(!is_submittable(&ex, &passing(), None, true, now));
    }

    #[test]
    fn test_single_failing_test_blocks_even_when_validation_disabled() {
        let now = Utc::now();
        let ex = Exercise::new("a");
        let mut results = passing();
        results.push(TestCaseResult::fail("A c", "expected true"));
        let validation = ValidationResult::clean(Strategy::Disabled);
        assert!(!is_submittable(&ex, &results, Some(&validation), true, now));
    }

    #[test]
    fn test_fail_strategy_with_findings_blocks() {
        let now = Utc::now();
        let ex = Exercise::new("a");
        assert!(!is_submittable(&ex, &passing(), Some(&findings(Strategy::Fail)), true, now));
    }

    #[test]
    fn test_warn_strategy_findings_are_ignored() {
        let now = Utc::now();
        let ex = Exercise::new("a");
        let validation = findings(Strategy::Warn);
        assert!(is_submittable(&ex, &passing(), Some(&validation), true, now));
        assert!(!is_submittable(&ex, &passing(), Some(&validation), false, now));
    }

    #[test]
    fn test_missing_validation_is_skipped() {
        let now = Utc::now();
        assert!(is_submittable(&Exercise::new("a"), &passing(), None, true, now));
    }

    #[test]
    fn test_not_returnable_blocks() {
        let now = Utc::now();
        assert!(!is_submittable(&Exercise::new("a"), &passing(), None, false, now));
    }
}
