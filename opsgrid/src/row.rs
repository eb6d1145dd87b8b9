//! Row entities and the `{columns, data}` dataset handed over by pages.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::column::Column;
use crate::error::{GridError, Result};
use crate::value;

/// A single row of the dataset.
///
/// Rows carry arbitrary fields plus optional children. A row without
/// children is a leaf. Depth is never stored on the row; it only exists on
/// the [`FlatRow`] records emitted by the flattener.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Identifier, unique within the dataset.
    pub id: String,
    /// Arbitrary row fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    /// Child rows (hierarchical datasets only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Row>>,
}

impl Row {
    /// Create a leaf row with no fields.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
            children: None,
        }
    }

    /// Set a field value.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Attach child rows.
    pub fn with_children(mut self, children: Vec<Row>) -> Self {
        self.children = Some(children);
        self
    }

    /// Child rows, empty for leaves.
    pub fn children(&self) -> &[Row] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Whether this row has at least one child.
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    /// Look up a field by dotted path (`"odds.home"`).
    ///
    /// Missing segments return `None`. The row id lives outside `fields`
    /// and is not reachable through this lookup.
    pub fn get(&self, path: &str) -> Option<&Value> {
        value::lookup(&self.fields, path)
    }

    /// Decode a row from a JSON value.
    ///
    /// Ids may be strings or numbers. Returns `None` for non-objects or rows
    /// without a usable `id`; children without ids are dropped the same way
    /// and reported through `warnings`.
    fn from_value(value: Value, path: String, warnings: &mut Vec<DatasetWarning>) -> Option<Self> {
        let Value::Object(mut fields) = value else {
            warnings.push(DatasetWarning::NotAnObject { path });
            return None;
        };

        let id = match fields.remove("id") {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                warnings.push(DatasetWarning::MissingRowId { path });
                return None;
            }
        };

        let children = match fields.remove("children") {
            Some(Value::Array(items)) => Some(
                items
                    .into_iter()
                    .enumerate()
                    .filter_map(|(i, child)| {
                        Row::from_value(child, format!("{path}.children[{i}]"), warnings)
                    })
                    .collect(),
            ),
            Some(Value::Null) | None => None,
            Some(_) => {
                warnings.push(DatasetWarning::InvalidChildren { id: id.clone() });
                None
            }
        };

        Some(Self {
            id,
            fields,
            children,
        })
    }
}

/// A visible row emitted by the hierarchy flattener.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow<'a> {
    /// The underlying row.
    pub row: &'a Row,
    /// Depth in the tree (0 = root).
    pub display_level: usize,
    /// Position in the flattened output.
    pub original_index: usize,
    /// Whether the row has children.
    pub has_children: bool,
    /// Whether the row's children are currently shown.
    pub is_expanded: bool,
}

impl FlatRow<'_> {
    /// The row id.
    pub fn id(&self) -> &str {
        &self.row.id
    }
}

/// A caller bug found while decoding a dataset.
///
/// These are developer-facing: the offending rows are skipped and the rest
/// of the dataset still renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetWarning {
    /// A row has no string or numeric `id`.
    MissingRowId { path: String },
    /// A row entry is not a JSON object.
    NotAnObject { path: String },
    /// A row's `children` is neither an array nor null.
    InvalidChildren { id: String },
}

impl std::fmt::Display for DatasetWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRowId { path } => write!(f, "row at {path} has no id; skipped"),
            Self::NotAnObject { path } => write!(f, "row at {path} is not an object; skipped"),
            Self::InvalidChildren { id } => {
                write!(f, "row '{id}' has a non-array `children`; treated as leaf")
            }
        }
    }
}

/// A `{columns, data}` pair as handed to the grid by a page.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Column schema.
    pub columns: Vec<Column>,
    /// Rows (flat or tree).
    pub rows: Vec<Row>,
    /// Server-side total (`pagination.total`), when the payload carries one.
    pub total_count: Option<usize>,
}

impl Dataset {
    /// Create a dataset from columns and rows.
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Self {
            columns,
            rows,
            total_count: None,
        }
    }

    /// Decode a dataset from JSON.
    ///
    /// Accepts `{"columns": [...], "data": [...]}` with an optional
    /// `"pagination": {"total": n}` as produced by the REST layer. Rows that
    /// cannot be used are skipped and returned as warnings, which are also
    /// logged.
    pub fn from_json(input: &str) -> Result<(Self, Vec<DatasetWarning>)> {
        let root: Value = serde_json::from_str(input)?;
        let Value::Object(mut root) = root else {
            return Err(GridError::DatasetShape("expected a JSON object".into()));
        };

        let columns: Vec<Column> = match root.remove("columns") {
            Some(value) => serde_json::from_value(value)?,
            None => Vec::new(),
        };

        let data = match root.remove("data") {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => Vec::new(),
            Some(_) => return Err(GridError::DatasetShape("`data` must be an array".into())),
        };

        let total_count = root
            .get("pagination")
            .and_then(|p| p.get("total"))
            .and_then(Value::as_u64)
            .map(|n| n as usize);

        let mut warnings = Vec::new();
        let rows = data
            .into_iter()
            .enumerate()
            .filter_map(|(i, row)| Row::from_value(row, format!("data[{i}]"), &mut warnings))
            .collect();

        for warning in &warnings {
            log::warn!("[dataset] {}", warning);
        }

        Ok((
            Self {
                columns,
                rows,
                total_count,
            },
            warnings,
        ))
    }
}
