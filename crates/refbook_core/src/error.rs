use thiserror::Error;

/// Error kinds stay distinct internally even though the HTTP edge
/// serializes them all into the same response shape — logs and callers
/// can still tell a bad parameter from a broken store.
#[derive(Debug, Error)]
pub enum RefbookError {
    /// Malformed or missing request input (dates, required parameters).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Storage integrity refusal: uniqueness violation or protected delete.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RefbookError>;
