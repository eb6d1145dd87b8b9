//! Column definition types.

use serde::{Deserialize, Serialize};

/// Width used when a column does not declare one.
pub const DEFAULT_COLUMN_WIDTH: f32 = 120.0;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// How a column's cells are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    #[default]
    Text,
    Chip,
    Currency,
    #[serde(alias = "dateTime")]
    Datetime,
    Multiline,
    Hierarchical,
    Button,
    /// Never rendered directly; its children are spliced in its place.
    Group,
    Checkbox,
}

/// Column configuration.
///
/// Columns define the structure of the grid: header text, declared width,
/// alignment and which interactions the column takes part in. Group columns
/// only hold `children`.
///
/// # Examples
///
/// ```
/// use opsgrid::column::{Alignment, Column, ColumnType};
///
/// let columns = vec![
///     Column::new("id", "ID", ColumnType::Number).width(80.0),
///     Column::new("event", "Event", ColumnType::Hierarchical).sortable().pinnable(),
///     Column::group("odds", "Odds", vec![
///         Column::new("odds.home", "Home", ColumnType::Number).align(Alignment::Right),
///         Column::new("odds.away", "Away", ColumnType::Number).align(Alignment::Right),
///     ]),
/// ];
/// assert_eq!(opsgrid::column::resolve(&columns).len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Unique identifier; doubles as the (dotted) field path for cell lookup.
    pub id: String,
    /// Header text.
    #[serde(default)]
    pub header: String,
    /// Cell rendering type.
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    /// Declared width in pixels.
    #[serde(default = "default_width")]
    pub width: f32,
    /// Horizontal alignment.
    #[serde(default)]
    pub align: Alignment,
    /// Whether clicking the header cycles the sort.
    #[serde(default)]
    pub sortable: bool,
    /// Whether the column may be pinned.
    #[serde(default)]
    pub pinnable: bool,
    /// Whether cells emit click events.
    #[serde(default)]
    pub clickable: bool,
    /// Child columns (group columns only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Column>,
}

fn default_width() -> f32 {
    DEFAULT_COLUMN_WIDTH
}

impl Column {
    /// Create a new column.
    pub fn new(id: impl Into<String>, header: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            column_type,
            width: DEFAULT_COLUMN_WIDTH,
            align: Alignment::Left,
            sortable: false,
            pinnable: false,
            clickable: false,
            children: Vec::new(),
        }
    }

    /// Create a group column whose children render in its place.
    pub fn group(id: impl Into<String>, header: impl Into<String>, children: Vec<Column>) -> Self {
        Self {
            children,
            ..Self::new(id, header, ColumnType::Group)
        }
    }

    /// Set the declared width.
    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Allow the column to be pinned.
    pub fn pinnable(mut self) -> Self {
        self.pinnable = true;
        self
    }

    /// Make cells clickable.
    pub fn clickable(mut self) -> Self {
        self.clickable = true;
        self
    }

    /// Whether this is a group column.
    pub fn is_group(&self) -> bool {
        self.column_type == ColumnType::Group
    }
}
