use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use opsgrid::debounce::Debouncer;
use opsgrid::layout::{MeasureScheduler, WidthRegistry};

fn ids(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// Debouncer
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_debouncer_runs_latest_only() {
    let mut debouncer = Debouncer::new(Duration::from_millis(50));
    let runs = Arc::new(AtomicUsize::new(0));
    let last = Arc::new(AtomicUsize::new(0));

    for value in 1..=3 {
        let runs = Arc::clone(&runs);
        let last = Arc::clone(&last);
        debouncer.trigger(move |_| {
            runs.fetch_add(1, Ordering::SeqCst);
            last.store(value, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert_eq!(last.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_debouncer_cancel() {
    let mut debouncer = Debouncer::new(Duration::from_millis(50));
    let runs = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&runs);
    debouncer.trigger(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert!(debouncer.is_pending());
    debouncer.cancel();

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[test]
fn test_debouncer_without_runtime_runs_inline() {
    let mut debouncer = Debouncer::new(Duration::from_millis(50));
    let runs = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&runs);
    let generation = debouncer.trigger(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(generation, 1);
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(!debouncer.is_pending());
}

// ============================================================================
// Measurement scheduling
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_measurement_waits_for_settle_delay() {
    let registry = WidthRegistry::new();
    let mut scheduler = MeasureScheduler::new(Arc::new(registry.clone()), Duration::from_millis(50));

    scheduler.schedule(ids(&["event"]), |_| {});
    registry.report("event", 131.0);

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(scheduler.widths().is_empty());

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(scheduler.widths().get("event"), Some(&131.0));
    assert_eq!(scheduler.applied_generation(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_superseded_measurement_never_applies() {
    let registry = WidthRegistry::new();
    registry.report("event", 100.0);
    registry.report("market", 90.0);
    let mut scheduler = MeasureScheduler::new(Arc::new(registry.clone()), Duration::from_millis(50));

    let applied = Arc::new(AtomicUsize::new(0));
    let first = Arc::clone(&applied);
    scheduler.schedule(ids(&["event"]), move |_| {
        first.fetch_add(1, Ordering::SeqCst);
    });
    tokio::time::sleep(Duration::from_millis(30)).await;

    let second = Arc::clone(&applied);
    let generation = scheduler.schedule(ids(&["event", "market"]), move |_| {
        second.fetch_add(10, Ordering::SeqCst);
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(applied.load(Ordering::SeqCst), 10);
    assert_eq!(scheduler.applied_generation(), generation);
    assert_eq!(scheduler.widths().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_measure_now_supersedes_pending() {
    let registry = WidthRegistry::new();
    registry.report("event", 100.0);
    let mut scheduler = MeasureScheduler::new(Arc::new(registry.clone()), Duration::from_millis(50));

    let applied = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&applied);
    scheduler.schedule(ids(&["event"]), move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    scheduler.measure_now(&ids(&["event"]));
    assert_eq!(scheduler.widths().get("event"), Some(&100.0));

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(applied.load(Ordering::SeqCst), 0);
}
