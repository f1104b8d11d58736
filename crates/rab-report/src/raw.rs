//! Aligned key/value listing.

use crate::error::Result;
use crate::flatten::flatten;
use serde_json::Value;
use std::io::Write;

/// Key column width cap.
const MAX_KEY_WIDTH: usize = 40;

/// Write every flattened path/value pair of `report` aligned into two
/// columns. The key column is as wide as the longest path, capped at 40.
pub fn render_raw<W: Write>(report: &Value, out: &mut W) -> Result<()> {
    let lines: Vec<(String, String)> = flatten(report)
        .map(|(path, leaf)| (path, leaf_text(leaf)))
        .collect();

    let width = lines
        .iter()
        .map(|(path, _)| path.len())
        .max()
        .unwrap_or(0)
        .min(MAX_KEY_WIDTH);

    for (path, value) in lines {
        writeln!(out, "{path:<width$} {value}")?;
    }
    Ok(())
}

/// Strings print bare; every other leaf prints as its JSON encoding.
fn leaf_text(leaf: &Value) -> String {
    match leaf {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
