//! Markdown report renderer.
//!
//! Produces the bug-report document: title, generation metadata, bullet
//! summary, collapsible per-library and per-section detail blocks, and
//! the censored-word fingerprint table. Consumes a report that is
//! already collected and censored.

use crate::error::Result;
use crate::flatten::flatten;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::io::Write;
use tracing::debug;

/// Markdown renderer with a fixed generation timestamp.
pub struct MarkdownRenderer {
    generated_at: DateTime<Utc>,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            generated_at: Utc::now(),
        }
    }

    /// Pin the generation timestamp (tests).
    pub fn with_timestamp(generated_at: DateTime<Utc>) -> Self {
        Self { generated_at }
    }

    /// Write the full document.
    pub fn render<W: Write>(&self, report: &Value, out: &mut W) -> Result<()> {
        debug!("rendering markdown report");

        writeln!(out, "# Reportabug Summary")?;
        writeln!(out)?;

        let argv = report["runtime"]["argv"].as_str().unwrap_or("");
        writeln!(
            out,
            "Generated {} with arguments [`{}`]",
            self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            argv
        )?;
        writeln!(out)?;

        if let Some(platform) = report["platform"].as_object() {
            writeln!(
                out,
                "* OS {} {}",
                text(platform.get("os")),
                text(platform.get("os_version"))
            )?;
            writeln!(
                out,
                "* Kernel {} ({})",
                text(platform.get("kernel")),
                text(platform.get("arch"))
            )?;
        }
        for (name, info) in sorted_entries(&report["module_info"]) {
            if let Some(summary) = info.get("summary").and_then(Value::as_str) {
                writeln!(out, "* `{name}` {summary}")?;
            }
        }
        writeln!(out)?;

        writeln!(out, "# Module info")?;
        for (name, info) in sorted_entries(&report["module_info"]) {
            self.details_open(out, &name)?;
            for (path, leaf) in flatten(info) {
                writeln!(out, "{} = {}", path, leaf)?;
            }
            self.details_close(out)?;
        }

        self.section_details(out, report, "runtime", Some("search_path"))?;
        self.section_details(out, report, "platform", None)?;

        writeln!(out, "## Environment")?;
        if let Some(environ) = report["environ"].as_object() {
            self.details_open(out, "Detail")?;
            let mut keys: Vec<&String> = environ.keys().collect();
            keys.sort();
            for key in keys {
                if key.eq_ignore_ascii_case("path") {
                    write_path_list(out, key, &environ[key])?;
                } else {
                    writeln!(out, "{} = {}", key, environ[key])?;
                }
            }
            self.details_close(out)?;
        }

        writeln!(out, "## Censored words")?;
        if let Some(censored) = report["censored"].as_object() {
            writeln!(out, "<details><summary>Detail</summary><p>")?;
            writeln!(out)?;
            writeln!(out, " Key | Info")?;
            writeln!(out, "-----|-----")?;
            let mut keys: Vec<&String> = censored.keys().collect();
            keys.sort();
            for key in keys {
                writeln!(out, "{} | {}", key, text(censored.get(key.as_str())))?;
            }
            writeln!(out)?;
            writeln!(out, "</p></details>")?;
            writeln!(out)?;
        }

        Ok(())
    }

    /// One collapsible block for a flat report section. `list_key`, if
    /// present in the section, renders its `:`-separated value as one
    /// entry per line.
    fn section_details<W: Write>(
        &self,
        out: &mut W,
        report: &Value,
        section: &str,
        list_key: Option<&str>,
    ) -> Result<()> {
        let Some(map) = report[section].as_object() else {
            return Ok(());
        };
        self.details_open(out, section)?;
        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort();
        for key in keys {
            if list_key == Some(key.as_str()) {
                writeln!(out, "{key} = [")?;
                for entry in map[key].as_str().unwrap_or("").split(':') {
                    writeln!(out, "    {:?},", entry)?;
                }
                writeln!(out, "]")?;
            } else {
                writeln!(out, "{} = {}", key, map[key])?;
            }
        }
        self.details_close(out)
    }

    fn details_open<W: Write>(&self, out: &mut W, summary: &str) -> Result<()> {
        writeln!(out, "<details><summary>{summary}</summary><p>")?;
        writeln!(out)?;
        writeln!(out, "```text")?;
        Ok(())
    }

    fn details_close<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "```")?;
        writeln!(out)?;
        writeln!(out, "</p></details>")?;
        writeln!(out)?;
        Ok(())
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment `PATH` value, one entry per line under a hanging prefix.
fn write_path_list<W: Write>(out: &mut W, key: &str, value: &Value) -> Result<()> {
    let mut prefix = format!("{key} =");
    let pad = " ".repeat(prefix.len());
    for entry in value.as_str().unwrap_or("").split(':') {
        writeln!(out, "{} {:?}", prefix, entry)?;
        prefix = pad.clone();
    }
    Ok(())
}

fn text(value: Option<&Value>) -> &str {
    value.and_then(Value::as_str).unwrap_or("unknown")
}

fn sorted_entries(section: &Value) -> Vec<(String, &Value)> {
    let Some(map) = section.as_object() else {
        return Vec::new();
    };
    let mut entries: Vec<(String, &Value)> = map.iter().map(|(k, v)| (k.clone(), v)).collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_report() -> Value {
        json!({
            "runtime": {
                "argv": "reportabug z",
                "executable": "/opt/bin/reportabug",
                "search_path": "/opt/lib:/usr/lib",
            },
            "platform": {
                "os": "Ubuntu",
                "os_version": "Linux 24.04 Ubuntu",
                "kernel": "6.8.0",
                "arch": "x86_64",
                "cpus": 8,
            },
            "environ": {
                "PATH": "/usr/bin:/bin",
                "RUST_LOG": "debug",
                "cwd": "/work",
            },
            "search_path": {"0": "liba.so:libz.so"},
            "module_info": {
                "z": {"file": "/opt/lib/libz.so.1.2.13", "so_version": "1.2.13", "summary": "looks good"},
                "gone": {"_error_type": "LibraryNotFound", "_error_full": "no library matching `gone`"},
            },
            "censored": {
                "$USER": "sha256=`aa`, unicode=`Ll`",
                "$HOST": "sha256=`bb`, unicode=`Ll`",
            },
        })
    }

    fn render(report: &Value) -> String {
        let renderer =
            MarkdownRenderer::with_timestamp(Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap());
        let mut out = Vec::new();
        renderer.render(report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_title_and_generation_line() {
        let text = render(&sample_report());
        assert!(text.starts_with("# Reportabug Summary\n"));
        assert!(text.contains("Generated 2026-08-07T12:00:00Z with arguments [`reportabug z`]"));
    }

    #[test]
    fn test_summary_bullets() {
        let text = render(&sample_report());
        assert!(text.contains("* OS Ubuntu Linux 24.04 Ubuntu"));
        assert!(text.contains("* Kernel 6.8.0 (x86_64)"));
        assert!(text.contains("* `z` looks good"));
        // modules without a summary get no bullet
        assert!(!text.contains("* `gone`"));
    }

    #[test]
    fn test_module_detail_blocks() {
        let text = render(&sample_report());
        assert!(text.contains("# Module info"));
        assert!(text.contains("<details><summary>z</summary><p>"));
        assert!(text.contains("so_version = \"1.2.13\""));
        assert!(text.contains("<details><summary>gone</summary><p>"));
        assert!(text.contains("_error_type = \"LibraryNotFound\""));
    }

    #[test]
    fn test_runtime_search_path_renders_as_list() {
        let text = render(&sample_report());
        assert!(text.contains("search_path = [\n    \"/opt/lib\",\n    \"/usr/lib\",\n]"));
    }

    #[test]
    fn test_environment_path_splits_per_entry() {
        let text = render(&sample_report());
        assert!(text.contains("PATH = \"/usr/bin\"\n       \"/bin\""));
        assert!(text.contains("RUST_LOG = \"debug\""));
    }

    #[test]
    fn test_censored_word_table() {
        let text = render(&sample_report());
        assert!(text.contains(" Key | Info"));
        let host = text.find("$HOST | sha256=`bb`").unwrap();
        let user = text.find("$USER | sha256=`aa`").unwrap();
        assert!(host < user, "censored keys should be sorted");
    }

    #[test]
    fn test_search_path_section_not_in_markdown() {
        let text = render(&sample_report());
        assert!(!text.contains("<details><summary>search_path</summary>"));
    }

    #[test]
    fn test_missing_sections_degrade() {
        let text = render(&json!({}));
        assert!(text.starts_with("# Reportabug Summary\n"));
        assert!(text.contains("# Module info"));
        assert!(text.contains("## Censored words"));
    }
}
