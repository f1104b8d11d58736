//! Platform snapshot collector.

use serde_json::{json, Value};
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

/// Snapshot the host platform: OS identity, kernel, architecture, CPU
/// count, and total memory. Probes that return nothing degrade to
/// `"unknown"`.
pub fn collect_platform() -> Value {
    let mut sys = System::new();
    sys.refresh_specifics(
        RefreshKind::new()
            .with_memory(MemoryRefreshKind::new().with_ram())
            .with_cpu(CpuRefreshKind::new()),
    );

    let os = System::name().unwrap_or_else(|| "unknown".to_string());
    let os_version = System::long_os_version().unwrap_or_else(|| "unknown".to_string());
    let kernel = System::kernel_version().unwrap_or_else(|| "unknown".to_string());

    json!({
        "os": os,
        "os_version": os_version,
        "kernel": kernel,
        "arch": std::env::consts::ARCH,
        "cpus": sys.cpus().len(),
        "memory_bytes": sys.total_memory(),
    })
}
