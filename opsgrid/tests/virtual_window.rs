use std::time::Duration;

use opsgrid::virtual_window::{ContainerSize, ResizeTracker, RowWindow, ScrollOffset, VirtualGrid};

// ============================================================================
// Grid window
// ============================================================================

#[test]
fn test_window_counts() {
    let grid = VirtualGrid::new(100.0, 50.0, 95);
    let range = grid
        .window(ContainerSize::new(450.0, 200.0), ScrollOffset::default())
        .unwrap();

    assert_eq!(range.column_count, 4);
    assert_eq!(range.row_count, 24);
    assert_eq!(range.rows, 0..4);
    assert_eq!(range.columns, 0..4);
}

#[test]
fn test_window_follows_scroll() {
    let grid = VirtualGrid::new(100.0, 50.0, 1000).with_overscan(1);
    let range = grid
        .window(ContainerSize::new(400.0, 200.0), ScrollOffset::new(0.0, 1000.0))
        .unwrap();

    // Rows 20..24 are in view, plus one row of overscan on each side.
    assert_eq!(range.rows, 19..25);
}

#[test]
fn test_window_columns_capped_by_item_count() {
    let grid = VirtualGrid::new(100.0, 50.0, 3);
    let range = grid
        .window(ContainerSize::new(f32::INFINITY, 200.0), ScrollOffset::default())
        .unwrap();

    assert_eq!(range.row_count, 1);
    assert_eq!(range.columns, 0..3);
    assert_eq!(range.item_indices().collect::<Vec<_>>(), vec![0, 1, 2]);

    let wide = VirtualGrid::new(10.0, 50.0, 2)
        .window(ContainerSize::new(1.0e9, 200.0), ScrollOffset::default())
        .unwrap();
    assert_eq!(wide.columns, 0..2);
}

#[test]
fn test_window_not_laid_out_renders_nothing() {
    let grid = VirtualGrid::new(100.0, 50.0, 10);
    assert!(grid.window(ContainerSize::new(0.0, 300.0), ScrollOffset::default()).is_none());
    assert!(grid.window(ContainerSize::new(300.0, 0.0), ScrollOffset::default()).is_none());
    assert!(grid.window(ContainerSize::new(-5.0, 300.0), ScrollOffset::default()).is_none());
}

#[test]
fn test_narrow_container_keeps_one_column() {
    let grid = VirtualGrid::new(100.0, 50.0, 3);
    let range = grid
        .window(ContainerSize::new(60.0, 500.0), ScrollOffset::default())
        .unwrap();
    assert_eq!(range.column_count, 1);
    assert_eq!(range.row_count, 3);
}

#[test]
fn test_item_indices_skip_partial_last_row() {
    let grid = VirtualGrid::new(100.0, 50.0, 10);
    let range = grid
        .window(ContainerSize::new(400.0, 500.0), ScrollOffset::default())
        .unwrap();

    let indices: Vec<usize> = range.item_indices().collect();
    assert_eq!(indices, (0..10).collect::<Vec<_>>());
    assert_eq!(range.position_of(9), (2, 1));
}

#[test]
fn test_content_size() {
    let grid = VirtualGrid::new(100.0, 50.0, 10);
    assert_eq!(
        grid.content_size(ContainerSize::new(400.0, 100.0)),
        Some((400.0, 150.0))
    );
}

// ============================================================================
// Row window
// ============================================================================

#[test]
fn test_row_window_range() {
    let window = RowWindow::new(30.0, 300.0).with_overscan(0);
    assert_eq!(window.visible_range(100, 0.0), 0..10);
    assert_eq!(window.visible_range(100, 45.0), 1..12);
    assert_eq!(window.viewport_row_count(), 10);
}

#[test]
fn test_row_window_clamps_scroll() {
    let window = RowWindow::new(30.0, 300.0).with_overscan(0);
    assert_eq!(window.max_scroll(20), 300.0);
    assert_eq!(window.visible_range(20, 10_000.0), 10..20);
    assert_eq!(window.visible_range(5, 50.0), 0..5);
    assert_eq!(window.visible_range(0, 0.0), 0..0);
}

// ============================================================================
// Resize debouncing
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_resize_last_write_wins() {
    let mut tracker = ResizeTracker::new(Duration::from_millis(200));
    tracker.observe(ContainerSize::new(300.0, 200.0));
    tokio::time::sleep(Duration::from_millis(100)).await;
    tracker.observe(ContainerSize::new(320.0, 200.0));
    tokio::time::sleep(Duration::from_millis(100)).await;
    tracker.observe(ContainerSize::new(640.0, 480.0));

    assert!(tracker.is_pending());
    assert_eq!(tracker.size(), None);

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(tracker.size(), Some(ContainerSize::new(640.0, 480.0)));
    assert!(!tracker.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_resize_window_after_first_layout() {
    let mut tracker = ResizeTracker::new(Duration::from_millis(200));
    let grid = VirtualGrid::new(100.0, 50.0, 40);
    assert!(tracker.window(&grid, ScrollOffset::default()).is_none());

    tracker.set_now(ContainerSize::new(400.0, 100.0));
    let range = tracker.window(&grid, ScrollOffset::default()).unwrap();
    assert_eq!(range.column_count, 4);
    assert_eq!(range.rows, 0..2);
}
