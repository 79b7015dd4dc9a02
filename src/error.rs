//! Domain errors for catalog lookups, collection mutations and storage.

use thiserror::Error;

/// Errors surfaced by the storefront library.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A product, review or other record id does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Input rejected before any mutation happened.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Persisted data could not be parsed. Recovered inside the storage layer.
    #[error("Corrupt data under key '{key}': {reason}")]
    StorageCorruption { key: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// Builds a `NotFound` error for the given record kind.
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound { kind, id: id.to_string() }
    }

    /// Builds an `InvalidInput` error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Returns true for `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
