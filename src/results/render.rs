//! The rendering thread.
//!
//! Results are never shown from a worker. Workers hand finished attempts to a
//! [`RenderDispatcher`]; one dedicated thread owns the [`ResultRenderer`] and
//! shows them in arrival order.

use std::thread::{self, JoinHandle};

use tokio::sync::mpsc;

use crate::error::{Result, TmcError};
use crate::results::state::AttemptResults;

/// Name of the thread that owns the renderer
pub const RENDER_THREAD_NAME: &str = "tmc-render";

/// Shows the results of a finished attempt to the user.
pub trait ResultRenderer: Send + 'static {
    fn show_results(&mut self, results: AttemptResults);
}

/// Cloneable, non-blocking entry point into the render thread.
#[derive(Debug, Clone)]
pub struct RenderDispatcher {
    tx: mpsc::UnboundedSender<AttemptResults>,
}

impl RenderDispatcher {
    /// Queue results for the render thread
    pub fn dispatch(&self, results: AttemptResults) -> Result<()> {
        self.tx.send(results).map_err(|_| TmcError::RenderClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// The render thread. Runs until every dispatcher has been dropped.
pub struct RenderLoop {
    thread: JoinHandle<usize>,
}

impl RenderLoop {
    /// Start the render thread with `renderer`
    pub fn spawn<R: ResultRenderer>(mut renderer: R) -> Result<(RenderDispatcher, RenderLoop)> {
        let (tx, mut rx) = mpsc::unbounded_channel::<AttemptResults>();

        let thread = thread::Builder::new()
            .name(RENDER_THREAD_NAME.to_string())
            .spawn(move || {
                let mut rendered = 0;
                while let Some(results) = rx.blocking_recv() {
                    log::debug!(
                        "Rendering results for {} (submittable: {})",
                        results.exercise.name,
                        results.submittable
                    );
                    renderer.show_results(results);
                    rendered += 1;
                }
                log::debug!("Render loop finished after {} attempts", rendered);
                rendered
            })?;

        Ok((RenderDispatcher { tx }, RenderLoop { thread }))
    }

    /// Wait for the thread to finish; returns how many attempts it rendered.
    /// Blocks, so drop every dispatcher first.
    pub fn join(self) -> Result<usize> {
        self.thread
            .join()
            .map_err(|_| TmcError::TaskPanicked(RENDER_THREAD_NAME.to_string()))
    }
}
