//! Width measurement capability and fallbacks.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::column::CHECKBOX_COLUMN_ID;

/// Source of rendered column widths.
///
/// Implemented by whatever can read post-layout widths. `None` means the
/// column has not been measured (yet).
pub trait MeasurementProvider: Send + Sync {
    /// Rendered width of a column, if known.
    fn measure(&self, column_id: &str) -> Option<f32>;
}

impl MeasurementProvider for HashMap<String, f32> {
    fn measure(&self, column_id: &str) -> Option<f32> {
        self.get(column_id).copied()
    }
}

/// Widths pushed by header cells as they render.
///
/// Each header cell reports its own width through [`WidthRegistry::report`]
/// instead of the grid querying the host layout globally. Cheap to clone;
/// clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct WidthRegistry {
    widths: Arc<RwLock<HashMap<String, f32>>>,
}

impl WidthRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a header cell's rendered width.
    ///
    /// Non-finite or non-positive widths count as "not measured".
    pub fn report(&self, column_id: impl Into<String>, width: f32) {
        let column_id = column_id.into();
        if let Ok(mut guard) = self.widths.write() {
            if width.is_finite() && width > 0.0 {
                guard.insert(column_id, width);
            } else {
                guard.remove(&column_id);
            }
        }
    }

    /// Forget a column (its header cell unmounted).
    pub fn forget(&self, column_id: &str) {
        if let Ok(mut guard) = self.widths.write() {
            guard.remove(column_id);
        }
    }

    /// Number of columns with a reported width.
    pub fn len(&self) -> usize {
        self.widths.read().map(|g| g.len()).unwrap_or(0)
    }

    /// Whether no widths have been reported.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MeasurementProvider for WidthRegistry {
    fn measure(&self, column_id: &str) -> Option<f32> {
        self.widths
            .read()
            .ok()
            .and_then(|g| g.get(column_id).copied())
    }
}

/// Widths used before a column has been measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackWidths {
    /// Fallback for the selection column.
    pub checkbox: f32,
    /// Fallback for every other column.
    pub default: f32,
    /// Per-column fallbacks that take precedence.
    pub overrides: HashMap<String, f32>,
}

impl Default for FallbackWidths {
    fn default() -> Self {
        Self {
            checkbox: 48.0,
            default: 120.0,
            overrides: HashMap::new(),
        }
    }
}

impl FallbackWidths {
    /// Fallback width for a column.
    pub fn width_for(&self, column_id: &str) -> f32 {
        if let Some(width) = self.overrides.get(column_id) {
            return *width;
        }
        if column_id == CHECKBOX_COLUMN_ID {
            self.checkbox
        } else {
            self.default
        }
    }

    /// Set a per-column fallback.
    pub fn with_override(mut self, column_id: impl Into<String>, width: f32) -> Self {
        self.overrides.insert(column_id.into(), width);
        self
    }
}

/// Measured width of a column, or its fallback.
pub fn effective_width(
    column_id: &str,
    measured: &dyn MeasurementProvider,
    fallback: &FallbackWidths,
) -> f32 {
    measured
        .measure(column_id)
        .unwrap_or_else(|| fallback.width_for(column_id))
}
