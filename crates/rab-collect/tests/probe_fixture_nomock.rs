//! Probe tests against real on-disk fixtures (no mocks).
//!
//! Builds a fake library installation in a temp directory: the library
//! file itself, pkg-config metadata, and an executable introspection
//! hook. Verifies the prober's attribute extraction, hook merging, and
//! double-layered failure recording.

#![cfg(unix)]

use rab_collect::probe_library;
use rab_common::StaticEnv;
use std::fs;
use std::path::Path;

fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Environment whose library search path is exactly `dir`.
fn fixture_env(dir: &Path, entries: &[&str]) -> StaticEnv {
    StaticEnv::new()
        .with_var("LD_LIBRARY_PATH", dir.to_str().unwrap())
        .with_var("DYLD_LIBRARY_PATH", dir.to_str().unwrap())
        .with_dir(dir, entries)
}

fn write_hook(dir: &Path, name: &str, script: &str) {
    let hook = dir.join(name);
    fs::write(&hook, script).unwrap();
    make_executable(&hook);
}

#[test]
fn test_probe_merges_version_attributes_and_hook_output() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();

    fs::write(dir.join("libexample.so.1.2.3"), b"").unwrap();
    fs::create_dir(dir.join("pkgconfig")).unwrap();
    fs::write(
        dir.join("pkgconfig/example.pc"),
        "prefix=/usr\nName: example\nDescription: example library\nVersion: 9.9.9\n",
    )
    .unwrap();
    write_hook(
        dir,
        "example-reportabug",
        "#!/bin/sh\nprintf '{\"summary\": \"looks good\", \"arg\": \"%s\"}' \"$1\"\n",
    );

    let env = fixture_env(dir, &["libexample.so.1.2.3", "pkgconfig", "example-reportabug"]);
    let result = probe_library(&env, "example", Some("arg value"));

    assert_eq!(result["so_version"], "1.2.3");
    assert_eq!(result["version"], "9.9.9");
    assert_eq!(result["name"], "example");
    assert_eq!(result["description"], "example library");
    assert!(result["file"]
        .as_str()
        .unwrap()
        .ends_with("libexample.so.1.2.3"));
    // hook output merged in
    assert_eq!(result["summary"], "looks good");
    assert_eq!(result["arg"], "arg value");
    assert!(result.get("_error_type").is_none());
}

#[test]
fn test_probe_passes_extra_argument_to_hook() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();

    fs::write(dir.join("libexample.so"), b"").unwrap();
    write_hook(
        dir,
        "example-reportabug",
        "#!/bin/sh\nprintf '{\"summary\": \"looks good\", \"arg\": \"%s\"}' \"$1\"\n",
    );

    let env = fixture_env(dir, &["libexample.so", "example-reportabug"]);
    let result = probe_library(&env, "example", Some("x"));

    assert_eq!(result["summary"], "looks good");
    assert_eq!(result["arg"], "x");
}

#[test]
fn test_hook_failure_keeps_collected_attributes() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();

    fs::write(dir.join("libexample.so.2.0.0"), b"").unwrap();
    write_hook(dir, "example-reportabug", "#!/bin/sh\necho broken >&2\nexit 3\n");

    let env = fixture_env(dir, &["libexample.so.2.0.0", "example-reportabug"]);
    let result = probe_library(&env, "example", None);

    // attributes gathered before the hook survive the hook failure
    assert_eq!(result["so_version"], "2.0.0");
    assert_eq!(result["_error_type"], "HookExitError");
    let full = result["_error_full"].as_str().unwrap();
    assert!(full.contains("status 3"), "got {full}");
    assert!(full.contains("broken"), "got {full}");
}

#[test]
fn test_hook_emitting_garbage_records_output_error() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();

    fs::write(dir.join("libexample.so"), b"").unwrap();
    write_hook(dir, "example-reportabug", "#!/bin/sh\necho not json\n");

    let env = fixture_env(dir, &["libexample.so", "example-reportabug"]);
    let result = probe_library(&env, "example", None);

    assert_eq!(result["_error_type"], "HookOutputError");
}

#[test]
fn test_hook_emitting_non_object_json_records_output_error() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();

    fs::write(dir.join("libexample.so"), b"").unwrap();
    write_hook(dir, "example-reportabug", "#!/bin/sh\necho '[1, 2, 3]'\n");

    let env = fixture_env(dir, &["libexample.so", "example-reportabug"]);
    let result = probe_library(&env, "example", None);

    assert_eq!(result["_error_type"], "HookOutputError");
    assert!(result["_error_full"].as_str().unwrap().contains("an array"));
}

#[test]
fn test_library_without_metadata_still_reports_location() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();

    fs::write(dir.join("libplain.so"), b"").unwrap();

    let env = fixture_env(dir, &["libplain.so"]);
    let result = probe_library(&env, "plain", None);

    assert!(result["file"].as_str().unwrap().ends_with("libplain.so"));
    assert!(result.get("so_version").is_none());
    assert!(result.get("version").is_none());
    assert!(result.get("_error_type").is_none());
}

#[test]
fn test_missing_library_never_errors() {
    let env = StaticEnv::new();
    let result = probe_library(&env, "absent", None);
    assert_eq!(result["_error_type"], "LibraryNotFound");
    assert!(result.get("file").is_none());
}
