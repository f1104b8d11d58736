//! reportabug pipeline.
//!
//! Wires the pieces together: collect every section, fingerprint and
//! censor the user and host names, and render the censored report in the
//! requested format. Collection is best-effort and cannot fail; only
//! rendering returns errors.

pub mod logging;

use rab_collect::{sections, Report};
use rab_common::{EnvProvider, Error, OutputFormat, Result};
use rab_redact::{censor, censor_word, CensorTable};
use rab_report::{render_json, render_raw, MarkdownRenderer, ReportError};
use serde_json::{Map, Value};
use std::io::Write;
use tracing::{debug, info};

/// Placeholder for the censored username.
pub const USER_PLACEHOLDER: &str = "$USER";
/// Placeholder for the censored hostname.
pub const HOST_PLACEHOLDER: &str = "$HOST";

/// Collect all report sections, then censor the username and hostname
/// everywhere, leaving fingerprints in the `censored` section.
pub fn generate_report(
    env: &dyn EnvProvider,
    libraries: &[String],
    extra_arg: Option<&str>,
) -> Report {
    info!(libraries = libraries.len(), "collecting report");
    let mut report = rab_collect::collect(env, libraries, extra_arg);

    let mut table = CensorTable::new();
    let mut censored = Map::new();
    if let Some(user) = env.username() {
        censored.insert(
            USER_PLACEHOLDER.to_string(),
            Value::String(censor_word(&user)),
        );
        table.push(user, USER_PLACEHOLDER);
    }
    if let Some(host) = env.hostname() {
        censored.insert(
            HOST_PLACEHOLDER.to_string(),
            Value::String(censor_word(&host)),
        );
        table.push(host, HOST_PLACEHOLDER);
    }
    report.insert(sections::CENSORED, Value::Object(censored));

    debug!(rules = table.len(), "censoring report");
    Report::from(censor(&report.as_value(), &table))
}

/// Render a censored report in the requested format.
pub fn render<W: Write>(report: &Report, format: OutputFormat, out: &mut W) -> Result<()> {
    let value = report.as_value();
    let result = match format {
        OutputFormat::Md => MarkdownRenderer::new().render(&value, out),
        OutputFormat::Raw => render_raw(&value, out),
        OutputFormat::Json => render_json(&value, out),
    };
    result.map_err(|err| match err {
        ReportError::Io(e) => Error::Io(e),
        ReportError::Json(e) => Error::Json(e),
    })
}

/// Full pipeline: collect, censor, render.
pub fn run<W: Write>(
    env: &dyn EnvProvider,
    libraries: &[String],
    extra_arg: Option<&str>,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let report = generate_report(env, libraries, extra_arg);
    render(&report, format, out)
}
