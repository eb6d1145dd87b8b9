//! Column model resolution: group splicing and render order.

use std::collections::HashSet;

use super::item::Column;

/// Reserved id of the synthetic selection column.
pub const CHECKBOX_COLUMN_ID: &str = "__checkbox";

/// A column in render order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderColumn<'a> {
    /// The synthetic selection column.
    Checkbox,
    /// A data column from the resolved schema.
    Data(&'a Column),
}

impl<'a> RenderColumn<'a> {
    /// Column id (the checkbox column uses [`CHECKBOX_COLUMN_ID`]).
    pub fn id(&self) -> &'a str {
        match self {
            Self::Checkbox => CHECKBOX_COLUMN_ID,
            Self::Data(column) => &column.id,
        }
    }

    /// The data column, if this is one.
    pub fn column(&self) -> Option<&'a Column> {
        match self {
            Self::Checkbox => None,
            Self::Data(column) => Some(column),
        }
    }

    /// Whether this is the synthetic checkbox column.
    pub fn is_checkbox(&self) -> bool {
        matches!(self, Self::Checkbox)
    }
}

/// Flatten a column schema into render columns.
///
/// Group columns are replaced in place by their children, in declared
/// order, losing group membership. Nested groups are spliced the same way.
/// A column id that appears twice is kept only at its first position.
pub fn resolve(columns: &[Column]) -> Vec<&Column> {
    let mut flat = Vec::with_capacity(columns.len());
    let mut seen: HashSet<&str> = HashSet::new();
    let mut stack = vec![columns.iter()];

    while let Some(iter) = stack.last_mut() {
        let Some(column) = iter.next() else {
            stack.pop();
            continue;
        };

        if column.is_group() {
            if column.children.is_empty() {
                log::warn!("[columns] group '{}' has no children", column.id);
            }
            stack.push(column.children.iter());
            continue;
        }

        if column.id == CHECKBOX_COLUMN_ID {
            log::warn!("[columns] column id '{}' is reserved; skipped", column.id);
            continue;
        }

        if !seen.insert(column.id.as_str()) {
            log::warn!("[columns] duplicate column id '{}'; skipped", column.id);
            continue;
        }

        flat.push(column);
    }

    flat
}

/// Render order for resolved columns.
///
/// Prepends the synthetic checkbox column when `checkable`. The checkbox is
/// never part of `flat` itself.
pub fn render_order<'a>(flat: &[&'a Column], checkable: bool) -> Vec<RenderColumn<'a>> {
    let mut order = Vec::with_capacity(flat.len() + usize::from(checkable));
    if checkable {
        order.push(RenderColumn::Checkbox);
    }
    order.extend(flat.iter().map(|column| RenderColumn::Data(column)));
    order
}

/// Find a resolved column by id.
pub fn find<'a>(flat: &[&'a Column], id: &str) -> Option<&'a Column> {
    flat.iter().copied().find(|column| column.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnType;

    fn ids<'a>(flat: &[&'a Column]) -> Vec<&'a str> {
        flat.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_resolve_splices_nested_groups() {
        let columns = vec![
            Column::new("a", "A", ColumnType::Text),
            Column::group(
                "g",
                "G",
                vec![
                    Column::new("b", "B", ColumnType::Text),
                    Column::group("h", "H", vec![Column::new("c", "C", ColumnType::Text)]),
                    Column::new("d", "D", ColumnType::Text),
                ],
            ),
            Column::new("e", "E", ColumnType::Text),
        ];
        assert_eq!(ids(&resolve(&columns)), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_resolve_drops_duplicates_and_reserved() {
        let columns = vec![
            Column::new("a", "First", ColumnType::Text),
            Column::new(CHECKBOX_COLUMN_ID, "Sneaky", ColumnType::Checkbox),
            Column::group("g", "G", vec![Column::new("a", "Second", ColumnType::Text)]),
            Column::group("empty", "Empty", Vec::new()),
        ];
        let flat = resolve(&columns);
        assert_eq!(ids(&flat), vec!["a"]);
        assert_eq!(flat[0].header, "First");
    }

    #[test]
    fn test_render_order_checkbox_not_in_flat() {
        let columns = vec![Column::new("a", "A", ColumnType::Text)];
        let flat = resolve(&columns);
        let order = render_order(&flat, true);

        assert_eq!(order.len(), 2);
        assert!(order[0].is_checkbox());
        assert_eq!(flat.len(), 1);
        assert_eq!(find(&flat, "a").map(|c| c.header.as_str()), Some("A"));
        assert!(render_order(&flat, false).iter().all(|c| !c.is_checkbox()));
    }
}
