//! The report container.

use serde_json::{Map, Value};

/// Well-known section names.
pub mod sections {
    pub const RUNTIME: &str = "runtime";
    pub const PLATFORM: &str = "platform";
    pub const ENVIRON: &str = "environ";
    pub const SEARCH_PATH: &str = "search_path";
    pub const MODULE_INFO: &str = "module_info";
    pub const CENSORED: &str = "censored";
}

/// One collected report: a mapping from section name to an arbitrary
/// nested value. Built fresh per invocation; nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct Report {
    sections: Map<String, Value>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace one section.
    pub fn insert(&mut self, name: &str, value: Value) {
        self.sections.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.sections.get(name)
    }

    /// View the whole report as one nested value.
    pub fn as_value(&self) -> Value {
        Value::Object(self.sections.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.sections)
    }
}

impl From<Value> for Report {
    /// Rebuild a report from a nested value. Non-mapping input produces
    /// an empty report.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(sections) => Report { sections },
            _ => Report::default(),
        }
    }
}
