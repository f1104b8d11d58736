//! Report rendering for reportabug.
//!
//! Consumes a collected, censored report and renders it for humans:
//!
//! - [`flatten`]: walk a nested value into an ordered sequence of
//!   (dotted path, leaf) pairs.
//! - [`render_raw`]: the flattened pairs aligned into two columns.
//! - [`MarkdownRenderer`]: a markdown document with collapsible detail
//!   sections and the censored-word fingerprint table.
//! - [`render_json`]: the censored report as pretty JSON.
//!
//! Renderers never mutate the report; they assume it is fully collected
//! and censored already.

pub mod error;
pub mod flatten;
pub mod markdown;
pub mod raw;

pub use error::{ReportError, Result};
pub use flatten::{flatten, Flatten};
pub use markdown::MarkdownRenderer;
pub use raw::render_raw;

use serde_json::Value;
use std::io::Write;

/// Write the censored report as pretty-printed JSON.
pub fn render_json<W: Write>(report: &Value, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}
