//! Runtime metadata collector.

use rab_common::EnvProvider;
use serde_json::{json, Value};

/// Snapshot the running tool: executable path, invocation arguments,
/// compile-time target, and the library search path.
pub fn collect_runtime(env: &dyn EnvProvider) -> Value {
    let executable = env
        .current_exe()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let search_path: Vec<String> = env
        .search_path()
        .iter()
        .map(|p| p.display().to_string())
        .collect();

    json!({
        "executable": executable,
        "argv": env.argv().join(" "),
        "os": std::env::consts::OS,
        "arch": std::env::consts::ARCH,
        "family": std::env::consts::FAMILY,
        "tool_version": env!("CARGO_PKG_VERSION"),
        "search_path": search_path.join(":"),
    })
}
