//! "Projects completely opened" readiness signal.

use tokio::runtime::Handle;
use tokio::sync::watch;

/// Deferred work to run once projects have opened
pub type ReadinessCallback = Box<dyn FnOnce() + Send + 'static>;

/// Tells interested parties when the workspace has finished opening projects.
pub trait ProjectReadinessSource: Send + Sync {
    /// Run `callback` at most once, some time after projects are open.
    /// It may never run if the host shuts down first.
    fn when_projects_completely_opened(&self, callback: ReadinessCallback);
}

/// One-shot readiness latch.
///
/// Callbacks registered before or after the latch fires run exactly once on
/// a runtime task. Dropping the latch unfired drops pending callbacks.
pub struct ProjectsReadiness {
    runtime: Handle,
    opened: watch::Sender<bool>,
}

impl ProjectsReadiness {
    pub fn new(runtime: Handle) -> Self {
        let (opened, _) = watch::channel(false);
        Self { runtime, opened }
    }

    /// Fire the latch. Later calls are no-ops.
    pub fn mark_completely_opened(&self) {
        if !self.opened.send_replace(true) {
            log::debug!("Projects completely opened");
        }
    }

    pub fn is_completely_opened(&self) -> bool {
        *self.opened.borrow()
    }
}

impl ProjectReadinessSource for ProjectsReadiness {
    fn when_projects_completely_opened(&self, callback: ReadinessCallback) {
        let mut opened = self.opened.subscribe();
        self.runtime.spawn(async move {
            if opened.wait_for(|opened| *opened).await.is_ok() {
                callback();
            } else {
                log::debug!("Projects never finished opening, dropping deferred callback");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_callback_waits_for_latch() {
        let readiness = ProjectsReadiness::new(Handle::current());
        let (tx, mut rx) = oneshot::channel();
        readiness.when_projects_completely_opened(Box::new(move || {
            let _ = tx.send(());
        }));

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(rx.try_recv().is_err());

        readiness.mark_completely_opened();
        assert!(readiness.is_completely_opened());
        tokio::time::timeout(Duration::from_secs(5), rx).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_callback_after_latch_still_runs() {
        let readiness = ProjectsReadiness::new(Handle::current());
        readiness.mark_completely_opened();
        readiness.mark_completely_opened();

        let (tx, rx) = oneshot::channel();
        readiness.when_projects_completely_opened(Box::new(move || {
            let _ = tx.send(());
        }));
        tokio::time::timeout(Duration::from_secs(5), rx).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_dropped_latch_never_runs_callback() {
        let readiness = ProjectsReadiness::new(Handle::current());
        let (tx, rx) = oneshot::channel::<()>();
        readiness.when_projects_completely_opened(Box::new(move || {
            let _ = tx.send(());
        }));
        drop(readiness);

        // The callback (and its sender) is dropped without running
        assert!(tokio::time::timeout(Duration::from_secs(5), rx).await.unwrap().is_err());
    }
}
