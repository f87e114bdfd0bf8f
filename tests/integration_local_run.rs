//! Local test run integration tests
//!
//! Drives whole attempts through the public API: background producers, the
//! per-attempt aggregator and the render thread.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;

use tmcrun::background::TokioTaskRunner;
use tmcrun::domain::{Exercise, RunLogs, RunOutcome, Strategy, TestCaseResult, ValidationError, ValidationResult};
use tmcrun::error::Result;
use tmcrun::results::{AttemptResults, ExerciseTooling, LocalTestRun, RENDER_THREAD_NAME, RenderLoop, ResultRenderer};

/// Tooling whose outcome depends on the exercise name
struct CourseTooling;

#[async_trait]
impl ExerciseTooling for CourseTooling {
    async fn run_tests(&self, exercise: &Exercise) -> Result<RunOutcome> {
        tokio::time::sleep(Duration::from_millis(2)).await;
        if exercise.name.ends_with("broken") {
            return Ok(RunOutcome::TestrunInterrupted {
                logs: RunLogs::stdout_only("init:\nrun-do-compile:\nKilled\n"),
            });
        }
        Ok(RunOutcome::Completed {
            test_results: vec![
                TestCaseResult::pass("NimiTest tulostaaNimen"),
                TestCaseResult::pass("NimiTest eiYlimaaraisia"),
            ],
            logs: RunLogs::default(),
        })
    }

    async fn run_code_style(&self, exercise: &Exercise) -> Result<ValidationResult> {
        tokio::time::sleep(Duration::from_millis(4)).await;
        if exercise.name.ends_with("sloppy") {
            return Ok(ValidationResult::with_errors(
                Strategy::Fail,
                vec![ValidationError::new("Nimi.java", 3, "Indentation")],
            ));
        }
        Ok(ValidationResult::clean(Strategy::Warn))
    }
}

#[derive(Clone, Default)]
struct Collector {
    shown: Arc<Mutex<Vec<(String, AttemptResults)>>>,
}

impl ResultRenderer for Collector {
    fn show_results(&mut self, results: AttemptResults) {
        let thread = std::thread::current().name().unwrap_or_default().to_string();
        self.shown.lock().unwrap().push((thread, results));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_attempts_render_once_each_on_render_thread() {
    let collector = Collector::default();
    let shown = collector.shown.clone();
    let (dispatcher, render_loop) = RenderLoop::spawn(collector).unwrap();
    let local = LocalTestRun::new(TokioTaskRunner::current(), Arc::new(CourseTooling), dispatcher);

    let names = ["viikko1-ok", "viikko1-sloppy", "viikko1-broken", "viikko2-ok"];
    let mut attempts = Vec::new();
    for name in names {
        attempts.push(local.start(Exercise::new(name), None).await.unwrap());
    }

    let verdicts: Vec<Option<bool>> = join_all(attempts.into_iter().map(|attempt| attempt.finished()))
        .await
        .into_iter()
        .map(|verdict| verdict.unwrap())
        .collect();
    assert_eq!(verdicts, vec![Some(true), Some(false), Some(false), Some(true)]);

    drop(local);
    let rendered = tokio::task::spawn_blocking(move || render_loop.join().unwrap())
        .await
        .unwrap();
    assert_eq!(rendered, names.len());

    let shown = shown.lock().unwrap();
    assert!(shown.iter().all(|(thread, _)| thread == RENDER_THREAD_NAME));

    let broken = shown
        .iter()
        .map(|(_, results)| results)
        .find(|results| results.exercise.name == "viikko1-broken")
        .unwrap();
    assert!(broken.validation.is_none());
    assert_eq!(broken.test_results.len(), 1);
    assert_eq!(broken.test_results[0].name, "Testrun interrupted");
    assert_eq!(broken.test_results[0].details, vec!["run-do-compile:", "Killed"]);
}

#[tokio::test]
async fn test_attempts_for_same_exercise_are_independent() {
    let collector = Collector::default();
    let shown = collector.shown.clone();
    let (dispatcher, render_loop) = RenderLoop::spawn(collector).unwrap();
    let local = LocalTestRun::new(TokioTaskRunner::current(), Arc::new(CourseTooling), dispatcher);

    let exercise = Exercise::new("viikko3-ok");
    let first = local.start(exercise.clone(), None).await.unwrap();
    let second = local.start(exercise, None).await.unwrap();
    assert_eq!(first.finished().await.unwrap(), Some(true));
    assert_eq!(second.finished().await.unwrap(), Some(true));

    drop(local);
    tokio::task::spawn_blocking(move || render_loop.join().unwrap())
        .await
        .unwrap();
    assert_eq!(shown.lock().unwrap().len(), 2);
}
