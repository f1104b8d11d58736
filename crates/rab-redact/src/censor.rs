//! Structural substring censoring.

use serde_json::Value;

/// Ordered list of (sensitive substring, placeholder) replacement rules.
///
/// Rules apply in insertion order, and each rule replaces every occurrence
/// of its substring. Order matters: text inserted by an earlier rule is
/// visible to later rules.
#[derive(Debug, Clone, Default)]
pub struct CensorTable {
    rules: Vec<(String, String)>,
}

impl CensorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one rule. Empty needles are dropped: an empty pattern would
    /// match between every character.
    pub fn push(&mut self, needle: impl Into<String>, placeholder: impl Into<String>) {
        let needle = needle.into();
        if needle.is_empty() {
            return;
        }
        self.rules.push((needle, placeholder.into()));
    }

    pub fn rules(&self) -> &[(String, String)] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

impl<N: Into<String>, P: Into<String>> FromIterator<(N, P)> for CensorTable {
    fn from_iter<I: IntoIterator<Item = (N, P)>>(iter: I) -> Self {
        let mut table = CensorTable::new();
        for (needle, placeholder) in iter {
            table.push(needle, placeholder);
        }
        table
    }
}

/// Produce a copy of `data` with every occurrence of every table needle
/// replaced by its placeholder.
///
/// Nulls, numbers, and booleans pass through unchanged; strings are
/// scanned rule by rule in table order; sequences map element-wise;
/// mappings map value-wise with keys untouched. The input is never
/// mutated.
pub fn censor(data: &Value, table: &CensorTable) -> Value {
    match data {
        Value::Null => Value::Null,
        Value::String(s) => {
            let mut out = s.clone();
            for (needle, placeholder) in table.rules() {
                out = out.replace(needle.as_str(), placeholder);
            }
            Value::String(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(|v| censor(v, table)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), censor(v, table)))
                .collect(),
        ),
        other => other.clone(),
    }
}
