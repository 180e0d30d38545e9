//! Registry error types

use thiserror::Error;

/// Errors surfaced while exporting a registry snapshot.
///
/// Malformed identity strings are never errors: the parser always recovers
/// to a degraded identity and logs a diagnostic instead.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("snapshot write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;
