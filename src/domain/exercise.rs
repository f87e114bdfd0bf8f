//! Exercise catalog entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// An exercise as the course catalog describes it.
///
/// Owned by the catalog; everything in this crate treats it as read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique name within the course, e.g. `viikko1-Viikko1_001.Nimi`
    pub name: String,
    /// Whether the server has already accepted a full solution
    #[serde(default)]
    pub completed: bool,
    /// Submission deadline, if the course sets one
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// Whether tests may be run on the student's machine
    #[serde(default = "default_true")]
    pub run_tests_locally_enabled: bool,
    /// Whether the server currently accepts submissions for this exercise
    #[serde(default = "default_true")]
    pub returnable: bool,
}

impl Exercise {
    /// Create an incomplete, returnable exercise without a deadline
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            completed: false,
            deadline: None,
            run_tests_locally_enabled: true,
            returnable: true,
        }
    }

    /// Set the deadline (builder pattern)
    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Mark as completed (builder pattern)
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Set returnability (builder pattern)
    pub fn with_returnable(mut self, returnable: bool) -> Self {
        self.returnable = returnable;
        self
    }

    /// Allow or forbid local test runs (builder pattern)
    pub fn with_local_tests(mut self, enabled: bool) -> Self {
        self.run_tests_locally_enabled = enabled;
        self
    }

    /// Whether the deadline lies before `now`. No deadline never passes.
    pub fn has_deadline_passed_at(&self, now: DateTime<Utc>) -> bool {
        self.deadline.is_some_and(|deadline| deadline < now)
    }

    /// Whether the deadline has passed as of the wall clock
    pub fn has_deadline_passed(&self) -> bool {
        self.has_deadline_passed_at(Utc::now())
    }

    /// Still worth working on: not completed and not past its deadline
    pub fn is_actionable_at(&self, now: DateTime<Utc>) -> bool {
        !self.completed && !self.has_deadline_passed_at(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_exercise_defaults() {
        let ex = Exercise::new("viikko1-Hello");
        assert_eq!(ex.name, "viikko1-Hello");
        assert!(!ex.completed);
        assert!(ex.deadline.is_none());
        assert!(ex.run_tests_locally_enabled);
        assert!(ex.returnable);
    }

    #[test]
    fn test_no_deadline_never_passes() {
        let ex = Exercise::new("a");
        assert!(!ex.has_deadline_passed_at(Utc::now() + Duration::days(10_000)));
    }

    #[test]
    fn test_deadline_passed() {
        let now = Utc::now();
        let ex = Exercise::new("a").with_deadline(now - Duration::hours(1));
        assert!(ex.has_deadline_passed_at(now));

        let ex = Exercise::new("a").with_deadline(now + Duration::hours(1));
        assert!(!ex.has_deadline_passed_at(now));
    }

    #[test]
    fn test_is_actionable() {
        let now = Utc::now();
        assert!(Exercise::new("a").is_actionable_at(now));
        assert!(!Exercise::new("a").with_completed(true).is_actionable_at(now));
        assert!(
            !Exercise::new("a")
                .with_deadline(now - Duration::minutes(1))
                .is_actionable_at(now)
        );
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let ex: Exercise = serde_json::from_str(r#"{"name": "viikko2-Kertoma"}"#).unwrap();
        assert_eq!(ex, Exercise::new("viikko2-Kertoma"));
    }

    #[test]
    fn test_deserialize_deadline() {
        let ex: Exercise =
            serde_yaml::from_str("name: x\ndeadline: 2001-01-01T00:00:00Z\nreturnable: false\n").unwrap();
        assert!(ex.has_deadline_passed());
        assert!(!ex.returnable);
    }
}
