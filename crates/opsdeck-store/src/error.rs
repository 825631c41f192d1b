use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field was missing or empty on create.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// No record matched the lookup key.
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// A record with a unique key already exists.
    #[error("{kind} already exists: {key}")]
    Duplicate { kind: &'static str, key: String },
}
