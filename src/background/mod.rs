//! Background task execution
//!
//! Producers (test runs, style checks) execute off the rendering thread.
//! Each submitted unit of work yields exactly one outcome: ready, cancelled
//! or failed.

pub mod runner;

pub use runner::{BackgroundTaskRunner, BgHandle, TaskOutcome, TokioTaskRunner};
