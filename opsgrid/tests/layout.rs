use std::collections::HashMap;

use opsgrid::column::{CHECKBOX_COLUMN_ID, Column, ColumnType, render_order, resolve};
use opsgrid::layout::{
    FallbackWidths, MeasurementProvider, WidthRegistry, compute_offset, compute_offsets,
    effective_width, pinned_order,
};

fn measured(pairs: &[(&str, f32)]) -> HashMap<String, f32> {
    pairs.iter().map(|(id, w)| (id.to_string(), *w)).collect()
}

fn schema() -> Vec<Column> {
    vec![
        Column::new("event", "Event", ColumnType::Text).pinnable(),
        Column::new("market", "Market", ColumnType::Text).pinnable(),
        Column::new("selection", "Selection", ColumnType::Text).pinnable(),
        Column::new("stake", "Stake", ColumnType::Currency),
    ]
}

// ============================================================================
// Offsets
// ============================================================================

#[test]
fn test_fallback_offsets_before_measurement() {
    let order = [CHECKBOX_COLUMN_ID, "event", "market"];
    let fallback = FallbackWidths::default();
    let none: HashMap<String, f32> = HashMap::new();

    let checkbox = compute_offset(CHECKBOX_COLUMN_ID, &order, &none, &fallback).unwrap();
    assert_eq!(checkbox.left, 0.0);

    let event = compute_offset("event", &order, &none, &fallback).unwrap();
    assert_eq!(event.left, 48.0);

    let market = compute_offset("market", &order, &none, &fallback).unwrap();
    assert_eq!(market.left, 168.0);
    assert!(market.is_last_pinned);
    assert!(!event.is_last_pinned);
}

#[test]
fn test_unpinned_column_has_no_offset() {
    let order = ["event"];
    let offset = compute_offset("stake", &order, &measured(&[]), &FallbackWidths::default());
    assert!(offset.is_none());
}

#[test]
fn test_offset_is_sum_of_preceding_widths() {
    let order = ["a", "b", "c", "d"];
    let widths = measured(&[("a", 10.0), ("b", 20.0), ("c", 40.0)]);
    let fallback = FallbackWidths::default();

    for (k, id) in order.iter().enumerate() {
        let expected: f32 = order[..k]
            .iter()
            .map(|id| effective_width(id, &widths, &fallback))
            .sum();
        let offset = compute_offset(id, &order, &widths, &fallback).unwrap();
        assert_eq!(offset.left, expected, "column {id}");
    }
}

#[test]
fn test_width_change_only_moves_later_columns() {
    let order = ["a", "b", "c", "d"];
    let fallback = FallbackWidths::default();
    let before = compute_offsets(&order, &measured(&[("b", 100.0)]), &fallback);
    let after = compute_offsets(&order, &measured(&[("b", 150.0)]), &fallback);

    assert_eq!(before["a"], after["a"]);
    assert_eq!(before["b"], after["b"]);
    assert_eq!(after["c"].left - before["c"].left, 50.0);
    assert_eq!(after["d"].left - before["d"].left, 50.0);
}

#[test]
fn test_compute_offsets_agrees_with_compute_offset() {
    let order = [CHECKBOX_COLUMN_ID, "a", "b"];
    let widths = measured(&[("a", 95.5)]);
    let fallback = FallbackWidths::default().with_override("b", 60.0);

    let all = compute_offsets(&order, &widths, &fallback);
    for id in order {
        assert_eq!(
            Some(all[id]),
            compute_offset(id, &order, &widths, &fallback)
        );
    }
}

// ============================================================================
// Pinned order
// ============================================================================

#[test]
fn test_checkbox_joins_pinned_order() {
    let columns = schema();
    let flat = resolve(&columns);
    let render = render_order(&flat, true);

    let order = pinned_order(&render, &["market", "event"]);
    assert_eq!(order, vec![CHECKBOX_COLUMN_ID, "event", "market"]);
}

#[test]
fn test_no_pins_means_checkbox_scrolls() {
    let columns = schema();
    let flat = resolve(&columns);
    let render = render_order(&flat, true);

    let none: [&str; 0] = [];
    assert!(pinned_order(&render, &none).is_empty());
}

#[test]
fn test_scenario_checkbox_and_two_pinned_columns() {
    let columns = schema();
    let flat = resolve(&columns);
    let render = render_order(&flat, true);
    let order = pinned_order(&render, &["event", "market", "selection"]);

    let offsets = compute_offsets(&order, &measured(&[]), &FallbackWidths::default());
    assert_eq!(offsets["selection"].left, 168.0);
    assert!(offsets["selection"].is_last_pinned);
}

// ============================================================================
// Width registry
// ============================================================================

#[test]
fn test_registry_reports_and_forgets() {
    let registry = WidthRegistry::new();
    registry.report("event", 132.0);
    registry.report("market", 0.0);

    assert_eq!(registry.measure("event"), Some(132.0));
    assert_eq!(registry.measure("market"), None);
    assert_eq!(registry.len(), 1);

    registry.forget("event");
    assert!(registry.is_empty());
}

#[test]
fn test_registry_clones_share_widths() {
    let registry = WidthRegistry::new();
    let header_cell = registry.clone();
    header_cell.report("event", 140.0);

    assert_eq!(registry.measure("event"), Some(140.0));
}

#[test]
fn test_registry_rejects_non_finite() {
    let registry = WidthRegistry::new();
    registry.report("event", 100.0);
    registry.report("event", f32::NAN);

    assert_eq!(registry.measure("event"), None);
}

#[test]
fn test_fallback_widths_from_json() {
    let fallback: FallbackWidths =
        serde_json::from_str(r#"{"default": 100, "overrides": {"id": 64}}"#).unwrap();

    assert_eq!(fallback.width_for(CHECKBOX_COLUMN_ID), 48.0);
    assert_eq!(fallback.width_for("event"), 100.0);
    assert_eq!(fallback.width_for("id"), 64.0);
}
