//! Error types for report rendering.

use thiserror::Error;

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while rendering a report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// I/O error while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
