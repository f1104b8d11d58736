//! Ambient-state provider.
//!
//! Collectors never reach for `std::env` or the filesystem directly.
//! Everything ambient (environment variables, argv, the executable path,
//! host identity, directory listings) is read through [`EnvProvider`], so
//! tests can substitute a fixed environment without mutating process
//! state.

use std::io;
use std::path::{Path, PathBuf};

/// Conventional system library directories appended after the loader
/// search path variable.
const SYSTEM_LIB_DIRS: &[&str] = &["/usr/local/lib", "/usr/lib", "/lib"];

#[cfg(target_os = "macos")]
const LOADER_PATH_VAR: &str = "DYLD_LIBRARY_PATH";
#[cfg(not(target_os = "macos"))]
const LOADER_PATH_VAR: &str = "LD_LIBRARY_PATH";

/// Read-only view of the process's ambient state.
pub trait EnvProvider {
    /// Look up one environment variable.
    fn var(&self, name: &str) -> Option<String>;

    /// Current working directory, if it can be determined.
    fn current_dir(&self) -> Option<PathBuf>;

    /// Path of the running executable, if it can be determined.
    fn current_exe(&self) -> Option<PathBuf>;

    /// The invocation arguments, including the program name.
    fn argv(&self) -> Vec<String>;

    /// Name of the current user.
    ///
    /// Read from `USER` then `LOGNAME`, matching what login shells export.
    fn username(&self) -> Option<String> {
        self.var("USER").or_else(|| self.var("LOGNAME"))
    }

    /// Name of the host machine.
    fn hostname(&self) -> Option<String>;

    /// Entries of one directory, unsorted.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    /// The library search path: loader variable entries first, then the
    /// conventional system directories, deduplicated in order. Entries
    /// are included whether or not they exist.
    fn search_path(&self) -> Vec<PathBuf> {
        let mut seen = Vec::new();
        let var = self.var(LOADER_PATH_VAR).unwrap_or_default();
        for entry in var.split(':').filter(|e| !e.is_empty()) {
            let p = PathBuf::from(entry);
            if !seen.contains(&p) {
                seen.push(p);
            }
        }
        for dir in SYSTEM_LIB_DIRS {
            let p = PathBuf::from(dir);
            if !seen.contains(&p) {
                seen.push(p);
            }
        }
        seen
    }
}

/// Provider backed by the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    pub fn new() -> Self {
        SystemEnv
    }
}

impl EnvProvider for SystemEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn current_dir(&self) -> Option<PathBuf> {
        std::env::current_dir().ok()
    }

    fn current_exe(&self) -> Option<PathBuf> {
        std::env::current_exe().ok()
    }

    fn argv(&self) -> Vec<String> {
        std::env::args().collect()
    }

    fn hostname(&self) -> Option<String> {
        // HOSTNAME first so callers (and tests) can pin it; system lookup
        // otherwise.
        self.var("HOSTNAME").or_else(|| {
            hostname::get()
                .ok()
                .map(|h| h.to_string_lossy().into_owned())
        })
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            entries.push(entry?.file_name().to_string_lossy().into_owned());
        }
        Ok(entries)
    }
}

/// Fixed provider for tests.
///
/// Everything defaults to absent; populate with the builder methods.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    vars: std::collections::BTreeMap<String, String>,
    cwd: Option<PathBuf>,
    exe: Option<PathBuf>,
    argv: Vec<String>,
    hostname: Option<String>,
    dirs: std::collections::BTreeMap<PathBuf, Vec<String>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl StaticEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_exe(mut self, exe: impl Into<PathBuf>) -> Self {
        self.exe = Some(exe.into());
        self
    }

    pub fn with_argv(mut self, argv: &[&str]) -> Self {
        self.argv = argv.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_hostname(mut self, hostname: &str) -> Self {
        self.hostname = Some(hostname.to_string());
        self
    }

    pub fn with_dir(mut self, path: impl Into<PathBuf>, entries: &[&str]) -> Self {
        self.dirs
            .insert(path.into(), entries.iter().map(|e| e.to_string()).collect());
        self
    }
}

#[cfg(any(test, feature = "test-utils"))]
impl EnvProvider for StaticEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn current_dir(&self) -> Option<PathBuf> {
        self.cwd.clone()
    }

    fn current_exe(&self) -> Option<PathBuf> {
        self.exe.clone()
    }

    fn argv(&self) -> Vec<String> {
        self.argv.clone()
    }

    fn hostname(&self) -> Option<String> {
        self.hostname.clone()
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        self.dirs.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{}", path.display()))
        })
    }
}
