//! Error types for value-graph operations
//!
//! Simple, flat error hierarchy. No over-engineering.

use thiserror::Error;

use crate::types::ValueKind;

pub type Result<T> = std::result::Result<T, ValueError>;

#[derive(Debug, Error)]
pub enum ValueError {
    #[error("Cyclic reference at {path}")]
    CyclicReference { path: String },

    #[error("Expected a sequence, got {actual}")]
    NotASequence { actual: ValueKind },

    #[error("Expected a mapping, got {actual}")]
    NotAMapping { actual: ValueKind },

    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
