//! Recorded attempts and console output for the CLI.

use async_trait::async_trait;
use colored::*;
use eyre::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use tmcrun::domain::{Exercise, RunOutcome, Strategy, ValidationResult};
use tmcrun::notify::UnopenedExercisesDialog;
use tmcrun::results::{AttemptResults, ExerciseTooling, ResultRenderer};

/// An attempt recorded to a JSON file
#[derive(Debug, Clone, Deserialize)]
pub struct AttemptFile {
    pub exercise: Exercise,
    pub run_outcome: RunOutcome,
    /// Missing means the course has no style checks
    #[serde(default)]
    pub validation: Option<ValidationResult>,
    /// Overrides the exercise's own returnable flag
    #[serde(default)]
    pub returnable: Option<bool>,
}

impl AttemptFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read attempt file")?;
        let mut attempt: Self = serde_json::from_str(&content).context("Failed to parse attempt file")?;
        if let Some(returnable) = attempt.returnable {
            attempt.exercise.returnable = returnable;
        }
        log::info!("Loaded attempt for {} from {}", attempt.exercise.name, path.as_ref().display());
        Ok(attempt)
    }
}

/// Tooling that answers with what the attempt file recorded
pub struct ReplayTooling {
    run_outcome: RunOutcome,
    validation: ValidationResult,
}

impl ReplayTooling {
    pub fn new(attempt: &AttemptFile) -> Self {
        Self {
            run_outcome: attempt.run_outcome.clone(),
            validation: attempt
                .validation
                .clone()
                .unwrap_or_else(|| ValidationResult::clean(Strategy::Disabled)),
        }
    }
}

#[async_trait]
impl ExerciseTooling for ReplayTooling {
    async fn run_tests(&self, _exercise: &Exercise) -> tmcrun::Result<RunOutcome> {
        Ok(self.run_outcome.clone())
    }

    async fn run_code_style(&self, _exercise: &Exercise) -> tmcrun::Result<ValidationResult> {
        Ok(self.validation.clone())
    }
}

/// Prints results to stdout
pub struct ConsoleRenderer;

impl ResultRenderer for ConsoleRenderer {
    fn show_results(&mut self, results: AttemptResults) {
        println!("{} {}", "Results for".cyan(), results.exercise.name.bold());

        for test in &results.test_results {
            if test.successful {
                println!("  {} {}", "PASS".green(), test.name);
            } else {
                println!("  {} {}", "FAIL".red(), test.name);
                if let Some(message) = &test.message {
                    println!("       {}", message);
                }
                for line in &test.details {
                    println!("       {}", line.dimmed());
                }
            }
        }

        if let Some(validation) = &results.validation {
            if validation.has_errors() {
                println!("  {} ({:?})", "Code style issues".yellow(), validation.strategy);
                for error in &validation.errors {
                    println!("    {}:{}: {}", error.file, error.line, error.message);
                }
            }
        }

        if results.submittable {
            println!("{}", "Ready to submit".green().bold());
        } else {
            println!("{}", "Not submittable".red().bold());
        }
    }
}

/// Lists exercises the notification would offer to open
pub struct ConsoleDialog;

impl UnopenedExercisesDialog for ConsoleDialog {
    fn display(&self, exercises: Vec<Exercise>) {
        println!("{}", "Closed exercises:".cyan());
        for exercise in exercises {
            println!("  {}", exercise.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ATTEMPT: &str = r#"{
        "exercise": {"name": "viikko1-Nimi", "returnable": true},
        "run_outcome": {
            "status": "COMPLETED",
            "test_results": [{"name": "NimiTest tulostaa", "successful": true}]
        },
        "returnable": false
    }"#;

    #[test]
    fn test_load_applies_returnable_override() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("attempt.json");
        fs::write(&path, ATTEMPT).unwrap();

        let attempt = AttemptFile::load(&path).unwrap();
        assert_eq!(attempt.exercise.name, "viikko1-Nimi");
        assert!(!attempt.exercise.returnable);
        assert!(attempt.validation.is_none());
    }

    #[tokio::test]
    async fn test_replay_defaults_to_disabled_style_checks() {
        let attempt: AttemptFile = serde_json::from_str(ATTEMPT).unwrap();
        let tooling = ReplayTooling::new(&attempt);
        let validation = tooling.run_code_style(&attempt.exercise).await.unwrap();
        assert_eq!(validation, ValidationResult::clean(Strategy::Disabled));
        let outcome = tooling.run_tests(&attempt.exercise).await.unwrap();
        assert_eq!(outcome, attempt.run_outcome);
    }
}
