//! Per test case results.

use serde::{Deserialize, Serialize};

/// Outcome of a single test case. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseResult {
    /// Test name, usually `Class method`
    pub name: String,
    /// Whether the test passed
    pub successful: bool,
    /// Failure or exception message
    #[serde(default)]
    pub message: Option<String>,
    /// Failure detail lines (stack trace, build log), in order
    #[serde(default)]
    pub details: Vec<String>,
    /// Points awarded by this test
    #[serde(default)]
    pub points: Vec<String>,
}

impl TestCaseResult {
    /// Create a passing result
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            successful: true,
            message: None,
            details: Vec::new(),
            points: Vec::new(),
        }
    }

    /// Create a failing result with a message
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            successful: false,
            message: Some(message.into()),
            details: Vec::new(),
            points: Vec::new(),
        }
    }

    /// Attach detail lines (builder pattern)
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    /// Attach awarded points (builder pattern)
    pub fn with_points(mut self, points: Vec<String>) -> Self {
        self.points = points;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass() {
        let result = TestCaseResult::pass("NimiTest testaa");
        assert!(result.successful);
        assert!(result.message.is_none());
        assert!(result.details.is_empty());
    }

    #[test]
    fn test_fail_with_details() {
        let result = TestCaseResult::fail("NimiTest testaa", "expected:<3> but was:<4>")
            .with_details(vec!["at NimiTest.testaa(NimiTest.java:12)".to_string()]);
        assert!(!result.successful);
        assert_eq!(result.message.as_deref(), Some("expected:<3> but was:<4>"));
        assert_eq!(result.details.len(), 1);
    }

    #[test]
    fn test_deserialize_minimal() {
        let result: TestCaseResult = serde_json::from_str(r#"{"name": "T t", "successful": true}"#).unwrap();
        assert_eq!(result, TestCaseResult::pass("T t"));
    }
}
