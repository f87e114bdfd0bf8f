//! Result aggregation for local test runs
//!
//! A test run and a code style run execute concurrently for one exercise.
//! Their outcomes meet in a per-attempt aggregator which decides when enough
//! is known, computes whether the attempt may be submitted, and hands the
//! results to the render thread exactly once.

pub mod aggregator;
pub mod build_log;
pub mod local_run;
pub mod render;
pub mod state;
pub mod submission;

pub use aggregator::{AggregatorHandle, DEFAULT_MAILBOX_CAPACITY, ResultAggregator};
pub use build_log::{COMPILE_MARKER, build_failure_result, clean_build_log, collect_log, split_lines};
pub use local_run::{AttemptHandle, CODE_STYLE_TASK, ExerciseTooling, LocalTestRun};
pub use render::{RENDER_THREAD_NAME, RenderDispatcher, RenderLoop, ResultRenderer};
pub use state::{AggregationState, AggregatorMsg, AttemptResults, SubmissionCallback};
pub use submission::is_submittable;
