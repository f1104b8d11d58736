//! Logging setup.
//!
//! stdout is reserved for the rendered report; all log output goes to
//! stderr. The filter honors `RAB_LOG` then `RUST_LOG`, falling back to
//! a level derived from the verbosity flags. `RAB_LOG_FORMAT=json`
//! switches to line-oriented JSON for machine consumption.

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable console output.
    #[default]
    Human,
    /// Line-oriented JSON.
    Json,
}

impl LogFormat {
    /// Read the format from `RAB_LOG_FORMAT`.
    pub fn from_env() -> Self {
        match std::env::var("RAB_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Human,
        }
    }
}

/// Map the verbosity flags to a default filter directive.
pub fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Initialize the logging subsystem. Call once at startup.
pub fn init_logging(verbose: u8, quiet: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_env("RAB_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose, quiet)));

    match format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .json();
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .init();
        }
    }
}
