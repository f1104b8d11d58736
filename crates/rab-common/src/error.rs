//! Error types for reportabug.
//!
//! Collection is best-effort by design: collectors and probes record
//! failures as data and never return errors. This type covers the thin
//! remainder where failure is real, which is rendering and I/O at the
//! top level.

use thiserror::Error;

/// Result type alias for reportabug operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for reportabug.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while writing a report.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Report rendering failed.
    #[error("render error: {0}")]
    Render(String),
}

impl Error {
    /// Exit code for the process when this error reaches the top level.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
