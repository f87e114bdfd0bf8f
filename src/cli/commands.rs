//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - verdict: replay an attempt file and print results plus verdict
//! - unopened: scan a course snapshot for unopened exercises

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tmcrun - local test results and unopened exercise checks
#[derive(Parser, Debug)]
#[command(name = "tmcrun")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded attempt and print whether it may be submitted
    Verdict {
        /// Attempt file (JSON): exercise, run_outcome, optional validation
        attempt: PathBuf,
    },

    /// Check a course snapshot for downloaded but unopened exercises
    Unopened {
        /// Course snapshot file (YAML)
        course: PathBuf,

        /// Scan even if the startup check is disabled in config
        #[arg(short, long)]
        force: bool,

        /// Click the notification, listing the exercises it would open
        #[arg(short, long)]
        open: bool,
    },
}
