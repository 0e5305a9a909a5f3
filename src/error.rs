// =====================================================================
// File: error.rs
//
// Description:
//   Error and outcome types shared by the index, the persistence
//   adapter and the command layer.
//
//   The first three variants are the non-fatal outcomes the catalog
//   reports back to the caller (duplicate id, missing id, empty sales
//   history). The rest come from the plumbing around it.
// =====================================================================

use thiserror::Error;

use crate::product::ProductId;

/// Result type alias using [`SalesError`].
pub type Result<T> = std::result::Result<T, SalesError>;

/// Errors and rejected outcomes of catalog operations.
#[derive(Debug, Error)]
pub enum SalesError {
    /// Insert of an id that is already in the index. Nothing was changed.
    #[error("product id {id} already exists")]
    DuplicateKey { id: ProductId },

    /// Search, update, delete or predict on an id that is not present.
    #[error("product id {id} not found")]
    NotFound { id: ProductId },

    /// Prediction requested for a product with an empty sales window.
    #[error("product id {id} has no past sales recorded")]
    InsufficientHistory { id: ProductId },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted line that could not be decoded.
    #[error("malformed line '{line}': {reason}")]
    MalformedLine { line: String, reason: String },

    /// A user supplied value that could not be accepted.
    #[error("invalid {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },
}
