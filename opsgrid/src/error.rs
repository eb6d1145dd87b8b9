//! Error types for the grid engine.
//!
//! Bounds problems (pages past the end, empty datasets, missing fields) are
//! never errors: they resolve to empty results. Only dataset decoding and
//! collaborator failures surface as [`GridError`].

use thiserror::Error;

use crate::row::Row;

/// Errors produced by the grid engine.
#[derive(Debug, Error)]
pub enum GridError {
    /// The dataset JSON could not be decoded.
    #[error("invalid dataset: {0}")]
    InvalidDataset(#[from] serde_json::Error),

    /// The dataset JSON decoded, but not into the `{columns, data}` shape.
    #[error("invalid dataset shape: {0}")]
    DatasetShape(String),

    /// A row-order persistence callback failed.
    ///
    /// `restore` holds the pre-drag row order the caller must put back.
    #[error("failed to persist row order: {message}")]
    Persist {
        /// Failure reported by the persister.
        message: String,
        /// The row order from before the drag.
        restore: Vec<Row>,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

/// Failure reported by a [`RowOrderPersister`](crate::reorder::RowOrderPersister).
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct PersistError(pub String);

impl PersistError {
    /// Creates a persist error from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
