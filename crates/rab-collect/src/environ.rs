//! Environment variable collector.

use rab_common::EnvProvider;
use serde_json::{Map, Value};

/// Variables surfaced in the report. Everything else is ignored: the
/// full environment routinely holds credentials and tokens that have no
/// business in a bug report.
pub const ENV_ALLOW_LIST: &[&str] = &[
    "RUSTUP_HOME",
    "CARGO_HOME",
    "RUSTUP_TOOLCHAIN",
    "RUSTFLAGS",
    "RUSTC_WRAPPER",
    "RUST_BACKTRACE",
    "RUST_LOG",
    "LD_LIBRARY_PATH",
    "DYLD_LIBRARY_PATH",
    "PKG_CONFIG_PATH",
    "LANG",
    "LC_ALL",
    "PATH",
];

/// Snapshot the allow-listed environment variables plus the working
/// directory. Absent variables are omitted, not recorded as null.
pub fn collect_environ(env: &dyn EnvProvider) -> Value {
    let mut data = Map::new();
    for name in ENV_ALLOW_LIST {
        if let Some(value) = env.var(name) {
            data.insert(name.to_string(), Value::String(value));
        }
    }

    let cwd = env
        .current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    data.insert("cwd".to_string(), Value::String(cwd));

    Value::Object(data)
}
