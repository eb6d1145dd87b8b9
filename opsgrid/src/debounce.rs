//! Last-write-wins deferred work.
//!
//! Used for the settle delay before column re-measurement and for container
//! resize handling. Every trigger bumps a generation counter; a pending task
//! only runs if its generation is still the latest once the delay elapses.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Debounces work so only the latest trigger runs.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Create a debouncer with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The latest generation handed out.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether `generation` is still the latest trigger.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation() == generation
    }

    /// Whether a task is waiting for its delay to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Schedule `task` after the delay, superseding any pending task.
    ///
    /// The task receives its generation. Outside a tokio runtime there is
    /// nothing to wait on, so the task runs immediately.
    pub fn trigger<F>(&mut self, task: F) -> u64
    where
        F: FnOnce(u64) + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::debug!("[debounce] no runtime; running generation {} inline", generation);
            task(generation);
            return generation;
        };

        let latest = Arc::clone(&self.generation);
        let delay = self.delay;
        self.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if latest.load(Ordering::SeqCst) == generation {
                task(generation);
            } else {
                log::trace!("[debounce] generation {} superseded", generation);
            }
        }));
        generation
    }

    /// Drop any pending task without running it.
    pub fn cancel(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
