//! Sort configuration.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::row::Row;
use crate::value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Current sort: a column key and direction, or no sort.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortConfig {
    /// Column id being sorted, `None` for the natural order.
    pub key: Option<String>,
    /// Direction (meaningless while `key` is `None`).
    pub direction: SortDirection,
}

impl SortConfig {
    /// Sort by `key` in `direction`.
    pub fn by(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    /// Whether any sort is active.
    pub fn is_active(&self) -> bool {
        self.key.is_some()
    }

    /// Direction for `key`, `None` when `key` is not the sorted column.
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        (self.key.as_deref() == Some(key)).then_some(self.direction)
    }

    /// Advance the sort for `key`.
    ///
    /// Cycles none → asc → desc → none for the same key; a different key
    /// replaces the previous one and starts at asc.
    pub fn toggle(&mut self, key: &str) {
        match (self.key.as_deref(), self.direction) {
            (Some(current), SortDirection::Asc) if current == key => {
                self.direction = SortDirection::Desc;
            }
            (Some(current), SortDirection::Desc) if current == key => {
                self.key = None;
                self.direction = SortDirection::Asc;
            }
            _ => {
                self.key = Some(key.to_string());
                self.direction = SortDirection::Asc;
            }
        }
    }

    /// Compare two rows under this sort. Equal when no sort is active.
    ///
    /// Rows without a value for the key sort last in both directions.
    pub fn compare(&self, a: &Row, b: &Row) -> Ordering {
        let Some(key) = self.key.as_deref() else {
            return Ordering::Equal;
        };
        let ordering = if key == "id" {
            a.id.cmp(&b.id)
        } else {
            let (va, vb) = (a.get(key), b.get(key));
            match (value::is_blank(va), value::is_blank(vb)) {
                (true, true) => return Ordering::Equal,
                (true, false) => return Ordering::Greater,
                (false, true) => return Ordering::Less,
                (false, false) => value::compare(va, vb),
            }
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}
