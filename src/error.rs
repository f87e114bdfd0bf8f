//! Error types for tmcrun
//!
//! Centralized error handling using thiserror. Expected conditions such as a
//! failed compile or a missing style check are not errors; they travel as
//! ordinary results.

use thiserror::Error;

/// All error types that can occur in tmcrun
#[derive(Debug, Error)]
pub enum TmcError {
    /// A background producer finished with an error instead of a result
    #[error("Task failed: {0}")]
    TaskFailed(String),

    /// A background producer panicked
    #[error("Task panicked: {0}")]
    TaskPanicked(String),

    /// The aggregator for an attempt is no longer accepting messages
    #[error("Aggregator closed: {0}")]
    AggregatorClosed(String),

    /// The render loop has shut down
    #[error("Render loop closed")]
    RenderClosed,

    /// Malformed input (attempt files, course snapshots)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for tmcrun operations
pub type Result<T> = std::result::Result<T, TmcError>;
