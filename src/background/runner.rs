//! Tokio-backed background task runner.

use std::future::Future;

use tokio::runtime::Handle;
use tokio::task::{AbortHandle, JoinHandle};

use crate::error::{Result, TmcError};

/// The single outcome of a background unit of work.
#[derive(Debug)]
pub enum TaskOutcome<T> {
    /// Work finished and produced a value
    Ready(T),
    /// Work was aborted before it finished
    Cancelled,
    /// Work returned an error or panicked
    Failed(TmcError),
}

impl<T> TaskOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, TaskOutcome::Ready(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, TaskOutcome::Cancelled)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TaskOutcome::Failed(_))
    }
}

/// Handle to one submitted unit of work.
///
/// Awaiting [`BgHandle::outcome`] consumes the handle, so the outcome is
/// observed once.
pub struct BgHandle<T> {
    description: String,
    handle: JoinHandle<Result<T>>,
}

impl<T> BgHandle<T> {
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Abort handle usable after the `BgHandle` itself has been moved away
    pub fn abort_handle(&self) -> AbortHandle {
        self.handle.abort_handle()
    }

    /// Request cancellation. A task that already finished keeps its outcome.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the work to finish and classify how it ended
    pub async fn outcome(self) -> TaskOutcome<T> {
        let BgHandle { description, handle } = self;
        match handle.await {
            Ok(Ok(value)) => TaskOutcome::Ready(value),
            Ok(Err(e)) => TaskOutcome::Failed(e),
            Err(e) if e.is_cancelled() => TaskOutcome::Cancelled,
            Err(e) => TaskOutcome::Failed(TmcError::TaskPanicked(format!("{}: {}", description, e))),
        }
    }
}

/// Runs units of work off the calling thread.
pub trait BackgroundTaskRunner: Send + Sync {
    /// Start `work` in the background, labelled with `description` for logs
    fn run<T, F>(&self, description: impl Into<String>, work: F) -> BgHandle<T>
    where
        T: Send + 'static,
        F: Future<Output = Result<T>> + Send + 'static;
}

/// Runner that spawns onto a tokio runtime's worker pool.
#[derive(Debug, Clone)]
pub struct TokioTaskRunner {
    runtime: Handle,
}

impl TokioTaskRunner {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Runner bound to the runtime of the calling task.
    ///
    /// Panics when called outside a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl BackgroundTaskRunner for TokioTaskRunner {
    fn run<T, F>(&self, description: impl Into<String>, work: F) -> BgHandle<T>
    where
        T: Send + 'static,
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let description = description.into();
        tracing::debug!(description = %description, "Starting background task");
        let handle = self.runtime.spawn(work);
        BgHandle { description, handle }
    }
}
