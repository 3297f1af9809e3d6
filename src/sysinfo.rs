use std::thread;

use crate::schema::SystemInfo;

/// Host snapshot embedded verbatim in the report.
pub fn collect() -> SystemInfo {
    SystemInfo {
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        cpu_count: thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1),
    }
}
