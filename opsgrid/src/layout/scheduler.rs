//! Deferred column-width measurement.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::debounce::Debouncer;

use super::measure::MeasurementProvider;

/// The latest applied measurement.
#[derive(Debug, Clone, Default)]
struct Applied {
    generation: u64,
    widths: HashMap<String, f32>,
}

/// Re-measures header widths after structural changes.
///
/// Every [`schedule`](Self::schedule) waits for the settle delay so the host
/// layout has committed, then reads widths from the provider. A newer
/// schedule supersedes a pending one, and a result older than the last
/// applied one is discarded.
pub struct MeasureScheduler {
    provider: Arc<dyn MeasurementProvider>,
    debouncer: Debouncer,
    applied: Arc<RwLock<Applied>>,
}

impl std::fmt::Debug for MeasureScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeasureScheduler")
            .field("debouncer", &self.debouncer)
            .field("applied", &self.applied)
            .finish_non_exhaustive()
    }
}

impl MeasureScheduler {
    /// Create a scheduler reading from `provider` after `settle_delay`.
    pub fn new(provider: Arc<dyn MeasurementProvider>, settle_delay: Duration) -> Self {
        Self {
            provider,
            debouncer: Debouncer::new(settle_delay),
            applied: Arc::new(RwLock::new(Applied::default())),
        }
    }

    /// Schedule a measurement of `column_ids`.
    ///
    /// `on_applied` runs with the generation once the widths are stored; it
    /// never runs for superseded measurements. Returns the generation.
    pub fn schedule<F>(&mut self, column_ids: Vec<String>, on_applied: F) -> u64
    where
        F: FnOnce(u64) + Send + 'static,
    {
        let provider = Arc::clone(&self.provider);
        let applied = Arc::clone(&self.applied);
        self.debouncer.trigger(move |generation| {
            let widths = measure_all(provider.as_ref(), &column_ids);
            if apply(&applied, generation, widths) {
                on_applied(generation);
            }
        })
    }

    /// Measure immediately, superseding any pending measurement.
    pub fn measure_now(&mut self, column_ids: &[String]) -> u64 {
        self.debouncer.cancel();
        let generation = self.debouncer.generation();
        let widths = measure_all(self.provider.as_ref(), column_ids);
        apply(&self.applied, generation, widths);
        generation
    }

    /// Drop any pending measurement.
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
    }

    /// Whether a measurement is waiting for the settle delay.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Generation of the last applied measurement (0 = none yet).
    pub fn applied_generation(&self) -> u64 {
        self.applied.read().map(|g| g.generation).unwrap_or(0)
    }

    /// Snapshot of the last applied widths.
    pub fn widths(&self) -> HashMap<String, f32> {
        self.applied
            .read()
            .map(|g| g.widths.clone())
            .unwrap_or_default()
    }
}

fn measure_all(provider: &dyn MeasurementProvider, column_ids: &[String]) -> HashMap<String, f32> {
    column_ids
        .iter()
        .filter_map(|id| provider.measure(id).map(|width| (id.clone(), width)))
        .collect()
}

/// Store widths unless a newer generation already landed.
fn apply(applied: &RwLock<Applied>, generation: u64, widths: HashMap<String, f32>) -> bool {
    let Ok(mut guard) = applied.write() else {
        return false;
    };
    if generation < guard.generation {
        log::debug!(
            "[layout] discarding stale measurement {} (applied {})",
            generation,
            guard.generation
        );
        return false;
    }
    log::trace!("[layout] applied measurement {} ({} columns)", generation, widths.len());
    guard.generation = generation;
    guard.widths = widths;
    true
}
