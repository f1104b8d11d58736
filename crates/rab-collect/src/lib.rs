//! Diagnostic collectors for reportabug.
//!
//! Each collector reads one category of ambient state (runtime metadata,
//! platform info, environment variables, library search path listings)
//! through the [`EnvProvider`][rab_common::EnvProvider] abstraction and
//! returns a freshly built nested value. Collection is best-effort: a
//! failed read degrades to a sentinel value, never an error.
//!
//! The prober ([`probe_library`]) locates one named library on the
//! search path, extracts its conventional version attributes, and runs
//! its optional introspection hook. It always returns a mapping; every
//! failure mode is recorded in the mapping itself.

pub mod environ;
pub mod platform;
pub mod probe;
pub mod report;
pub mod runtime;
pub mod search_path;

pub use environ::collect_environ;
pub use platform::collect_platform;
pub use probe::probe_library;
pub use report::{sections, Report};
pub use runtime::collect_runtime;
pub use search_path::collect_search_path;

use rab_common::EnvProvider;

/// Collect every report section except `censored`, probing each named
/// library in turn.
pub fn collect(env: &dyn EnvProvider, libraries: &[String], extra_arg: Option<&str>) -> Report {
    let mut report = Report::new();
    report.insert(sections::RUNTIME, collect_runtime(env));
    report.insert(sections::PLATFORM, collect_platform());
    report.insert(sections::ENVIRON, collect_environ(env));
    report.insert(sections::SEARCH_PATH, collect_search_path(env));

    let mut module_info = serde_json::Map::new();
    for name in libraries {
        module_info.insert(name.clone(), probe_library(env, name, extra_arg));
    }
    report.insert(sections::MODULE_INFO, serde_json::Value::Object(module_info));

    report
}
