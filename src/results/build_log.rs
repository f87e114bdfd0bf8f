//! Build log handling for failed builds.
//!
//! A build that fails to compile or is interrupted shows up as a single
//! synthetic failing test case carrying the captured log.

use crate::domain::{RunLogs, RunOutcome, TestCaseResult};

/// Build tool target that starts the interesting part of the log.
/// Everything before the first line containing it is preamble.
pub const COMPILE_MARKER: &str = "-do-compile:";

/// Split captured output into lines on `\r?\n`.
///
/// Trailing empty lines are dropped, so empty output contributes nothing.
pub fn split_lines(text: &str) -> Vec<String> {
    let segments: Vec<&str> = text.split('\n').collect();
    let last = segments.len() - 1;
    let mut lines: Vec<String> = segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            if i < last {
                segment.strip_suffix('\r').unwrap_or(segment).to_string()
            } else {
                segment.to_string()
            }
        })
        .collect();

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// Stdout lines followed by stderr lines
pub fn collect_log(logs: &RunLogs) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(stdout) = &logs.stdout {
        lines.extend(split_lines(stdout));
    }
    if let Some(stderr) = &logs.stderr {
        lines.extend(split_lines(stderr));
    }
    lines
}

/// Drop everything before the first line containing [`COMPILE_MARKER`].
/// Logs without the marker are returned unchanged.
pub fn clean_build_log(mut lines: Vec<String>) -> Vec<String> {
    if let Some(start) = lines.iter().position(|line| line.contains(COMPILE_MARKER)) {
        lines.drain(..start);
    }
    lines
}

/// The synthetic failing test case standing in for a failed build.
/// `None` when the run completed normally.
pub fn build_failure_result(outcome: &RunOutcome) -> Option<TestCaseResult> {
    let label = outcome.build_failure_label()?;
    let log = clean_build_log(collect_log(outcome.logs()));
    Some(TestCaseResult::fail(label, label).with_details(log))
}
