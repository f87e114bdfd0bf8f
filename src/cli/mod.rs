//! CLI module for tmcrun - command-line interface and subcommands.
//!
//! Replays a recorded attempt through the result aggregator, or runs the
//! unopened exercise scan against a course snapshot.

pub mod commands;

pub use commands::Cli;
