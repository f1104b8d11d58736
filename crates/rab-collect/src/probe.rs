//! Library prober.
//!
//! Locates one named library on the search path, extracts its
//! conventional version-identifying attributes (filename soname version,
//! pkg-config metadata, file location), and runs its optional
//! introspection hook. Probing never fails: both a missing library and a
//! broken hook are recorded in the returned mapping.

use rab_common::EnvProvider;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

/// Suffix of the per-library introspection hook executable.
pub const HOOK_SUFFIX: &str = "-reportabug";

/// Error indicator key in a probe result.
pub const ERROR_TYPE_KEY: &str = "_error_type";
/// Error detail key in a probe result.
pub const ERROR_FULL_KEY: &str = "_error_full";

/// Failures inside a library's introspection hook. These are recorded in
/// the probe result, never propagated.
#[derive(Debug, Error)]
enum HookError {
    #[error("failed to spawn {path:?}: {source}")]
    Spawn {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("hook exited with status {status}: {stderr}")]
    Exit { status: i32, stderr: String },

    #[error("hook output is not a JSON object: {0}")]
    Output(String),
}

impl HookError {
    fn kind(&self) -> &'static str {
        match self {
            HookError::Spawn { .. } => "HookSpawnError",
            HookError::Exit { .. } => "HookExitError",
            HookError::Output(_) => "HookOutputError",
        }
    }
}

/// Probe one named library.
///
/// On success the result holds the library's `file` location, the
/// filename-embedded `so_version` (if any), the pkg-config `version` /
/// `name` / `description` fields (if a `.pc` file is found), and
/// whatever the library's hook contributed. A library that cannot be
/// located yields only `_error_type` / `_error_full`; a hook failure
/// records the same pair alongside the attributes already collected.
pub fn probe_library(env: &dyn EnvProvider, name: &str, extra_arg: Option<&str>) -> Value {
    let mut data = Map::new();

    let path = match locate(env, name) {
        Some(path) => path,
        None => {
            debug!(library = name, "library not found on search path");
            data.insert(
                ERROR_TYPE_KEY.to_string(),
                Value::String("LibraryNotFound".to_string()),
            );
            data.insert(
                ERROR_FULL_KEY.to_string(),
                Value::String(format!("no library matching `{name}` on the search path")),
            );
            return Value::Object(data);
        }
    };
    debug!(library = name, path = %path.display(), "library located");

    data.insert(
        "file".to_string(),
        Value::String(path.display().to_string()),
    );

    if let Some(version) = filename_version(&path) {
        data.insert("so_version".to_string(), Value::String(version));
    }

    for (key, value) in pkg_config_fields(env, name, &path) {
        data.insert(key, Value::String(value));
    }

    if let Some(hook) = find_hook(env, name, &path) {
        debug!(library = name, hook = %hook.display(), "running introspection hook");
        match run_hook(&hook, extra_arg) {
            Ok(fields) => {
                for (key, value) in fields {
                    data.insert(key, value);
                }
            }
            Err(err) => {
                data.insert(
                    ERROR_TYPE_KEY.to_string(),
                    Value::String(err.kind().to_string()),
                );
                data.insert(ERROR_FULL_KEY.to_string(), Value::String(err.to_string()));
            }
        }
    }

    Value::Object(data)
}

/// Find the library file for `name` on the search path. The first
/// directory containing a match wins; within a directory, versioned
/// filenames are preferred and ties go to the lexicographically last
/// (highest) version.
fn locate(env: &dyn EnvProvider, name: &str) -> Option<PathBuf> {
    for dir in env.search_path() {
        let Ok(entries) = env.list_dir(&dir) else {
            continue;
        };
        let mut candidates: Vec<String> = entries
            .into_iter()
            .filter(|e| is_candidate(name, e))
            .collect();
        if candidates.is_empty() {
            continue;
        }
        candidates.sort();
        let chosen = candidates
            .iter()
            .rev()
            .find(|c| filename_version(Path::new(c.as_str())).is_some())
            .unwrap_or(&candidates[0]);
        return Some(dir.join(chosen));
    }
    None
}

/// Does `file` name the library `lib`, with or without the `lib` prefix
/// and with any version suffix?
fn is_candidate(lib: &str, file: &str) -> bool {
    for stem in [format!("lib{lib}"), lib.to_string()] {
        for ext in ["so", "dylib"] {
            let exact = format!("{stem}.{ext}");
            if file == exact || file.starts_with(&format!("{exact}.")) {
                return true;
            }
        }
    }
    false
}

/// Version embedded in a library filename: `libfoo.so.1.2.3` -> `1.2.3`.
fn filename_version(path: &Path) -> Option<String> {
    let file = path.file_name()?.to_str()?;
    let version = file
        .split_once(".so.")
        .or_else(|| file.split_once(".dylib."))
        .map(|(_, v)| v)?;
    if version.chars().next()?.is_ascii_digit() {
        Some(version.to_string())
    } else {
        None
    }
}

/// Read `Version:` / `Name:` / `Description:` from the library's
/// pkg-config file, looked up next to the library and then on
/// `PKG_CONFIG_PATH`.
fn pkg_config_fields(env: &dyn EnvProvider, name: &str, lib_path: &Path) -> Vec<(String, String)> {
    let pc_name = format!("{name}.pc");
    let mut candidates = Vec::new();
    if let Some(dir) = lib_path.parent() {
        candidates.push(dir.join("pkgconfig").join(&pc_name));
    }
    if let Some(pc_path) = env.var("PKG_CONFIG_PATH") {
        for dir in pc_path.split(':').filter(|d| !d.is_empty()) {
            candidates.push(Path::new(dir).join(&pc_name));
        }
    }

    for candidate in candidates {
        let Ok(content) = std::fs::read_to_string(&candidate) else {
            continue;
        };
        debug!(pc = %candidate.display(), "pkg-config metadata found");
        return parse_pc(&content);
    }
    Vec::new()
}

fn parse_pc(content: &str) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    for line in content.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let mapped = match key.trim() {
            "Version" => "version",
            "Name" => "name",
            "Description" => "description",
            _ => continue,
        };
        fields.push((mapped.to_string(), value.trim().to_string()));
    }
    fields
}

/// Find the `<name>-reportabug` hook executable, first next to the
/// library, then on `PATH`.
fn find_hook(env: &dyn EnvProvider, name: &str, lib_path: &Path) -> Option<PathBuf> {
    let hook_name = format!("{name}{HOOK_SUFFIX}");

    if let Some(dir) = lib_path.parent() {
        let candidate = dir.join(&hook_name);
        if is_executable(&candidate) {
            return Some(candidate);
        }
    }

    for dir in env.var("PATH").unwrap_or_default().split(':') {
        if dir.is_empty() {
            continue;
        }
        let candidate = Path::new(dir).join(&hook_name);
        if is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        return metadata.permissions().mode() & 0o111 != 0;
    }
    #[cfg(not(unix))]
    {
        let _ = metadata;
        true
    }
}

/// Run the hook and parse its stdout as a JSON object. No timeout: a
/// hook that blocks hangs the run, which is an accepted risk.
fn run_hook(hook: &Path, extra_arg: Option<&str>) -> Result<Map<String, Value>, HookError> {
    let mut command = Command::new(hook);
    if let Some(arg) = extra_arg {
        command.arg(arg);
    }
    let output = command.output().map_err(|source| HookError::Spawn {
        path: hook.to_path_buf(),
        source,
    })?;

    if !output.status.success() {
        return Err(HookError::Exit {
            status: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let parsed: Value = serde_json::from_slice(&output.stdout)
        .map_err(|e| HookError::Output(e.to_string()))?;
    match parsed {
        Value::Object(map) => Ok(map),
        other => Err(HookError::Output(format!(
            "expected an object, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rab_common::StaticEnv;

    #[test]
    fn test_is_candidate() {
        assert!(is_candidate("z", "libz.so"));
        assert!(is_candidate("z", "libz.so.1.3"));
        assert!(is_candidate("z", "z.so"));
        assert!(is_candidate("z", "libz.dylib"));
        assert!(!is_candidate("z", "libzstd.so"));
        assert!(!is_candidate("z", "libz.a"));
    }

    #[test]
    fn test_filename_version() {
        assert_eq!(
            filename_version(Path::new("/usr/lib/libz.so.1.2.13")).as_deref(),
            Some("1.2.13")
        );
        assert_eq!(filename_version(Path::new("/usr/lib/libz.so")), None);
        // non-numeric suffix is not a version
        assert_eq!(filename_version(Path::new("libz.so.debug")), None);
    }

    #[test]
    fn test_parse_pc() {
        let content = "prefix=/usr\n\nName: zlib\nDescription: compression library\nVersion: 1.2.13\nLibs: -lz\n";
        let fields = parse_pc(content);
        assert!(fields.contains(&("name".to_string(), "zlib".to_string())));
        assert!(fields.contains(&("version".to_string(), "1.2.13".to_string())));
        assert!(fields.contains(&("description".to_string(), "compression library".to_string())));
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_probe_missing_library_returns_error_mapping() {
        let env = StaticEnv::new();
        let result = probe_library(&env, "definitely-absent", None);
        assert_eq!(result[ERROR_TYPE_KEY], "LibraryNotFound");
        assert!(result[ERROR_FULL_KEY]
            .as_str()
            .unwrap()
            .contains("definitely-absent"));
    }

    #[test]
    fn test_locate_prefers_versioned_name() {
        let env = StaticEnv::new()
            .with_var("LD_LIBRARY_PATH", "/opt/lib")
            .with_var("DYLD_LIBRARY_PATH", "/opt/lib")
            .with_dir("/opt/lib", &["libz.so", "libz.so.1.2.13", "libz.so.1"]);
        let path = locate(&env, "z").unwrap();
        assert_eq!(path, PathBuf::from("/opt/lib/libz.so.1.2.13"));
    }

    #[test]
    fn test_locate_first_directory_wins() {
        let env = StaticEnv::new()
            .with_var("LD_LIBRARY_PATH", "/first:/second")
            .with_var("DYLD_LIBRARY_PATH", "/first:/second")
            .with_dir("/first", &["libz.so"])
            .with_dir("/second", &["libz.so.9"]);
        let path = locate(&env, "z").unwrap();
        assert_eq!(path, PathBuf::from("/first/libz.so"));
    }
}
