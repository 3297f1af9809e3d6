use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{BenchError, Result};
use crate::schema::{Report, WorkloadResult};

/// Human-readable dump of every result, in report order.
pub fn render_results(results: &[WorkloadResult]) -> String {
    let mut out = String::from("=== BENCHMARK RESULTS ===\n");
    for result in results {
        let _ = writeln!(out, "Test: {}", result.name);
        match &result.error {
            Some(error) => {
                let _ = writeln!(out, "  Status: {error}");
            }
            None => {
                let _ = writeln!(out, "  Duration: {} ns", result.duration_ns);
                let _ = writeln!(out, "  Memory: {} bytes", result.memory_bytes);
                let _ = writeln!(out, "  Operations: {}", result.operations);
                let _ = writeln!(out, "  Ops/sec: {:.2}", result.ops_per_sec);
            }
        }
        out.push('\n');
    }
    out
}

/// Accept a label only if it can sit inside a file name as a single component.
pub fn parse_label(s: &str) -> std::result::Result<String, String> {
    if s.is_empty() {
        return Err("label must not be empty".to_string());
    }
    if s.contains(['/', '\\']) || s.contains("..") {
        return Err(format!("label {s:?} must not contain path separators or `..`"));
    }
    Ok(s.to_string())
}

/// `benchmark_<label>_<YYYYmmdd_HHMMSS>.json`
pub fn report_filename(label: &str, at: &DateTime<Utc>) -> String {
    format!("benchmark_{label}_{}.json", at.format("%Y%m%d_%H%M%S"))
}

/// Write the report into `dir` under its conventional file name.
pub fn write_report(dir: &Path, report: &Report, started_at: &DateTime<Utc>) -> Result<PathBuf> {
    let path = dir.join(report_filename(&report.language, started_at));
    write_report_to(&path, report)?;
    Ok(path)
}

pub fn write_report_to(path: &Path, report: &Report) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).map_err(|source| BenchError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_report(path: &Path) -> Result<Report> {
    let raw = fs::read_to_string(path).map_err(|source| BenchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| BenchError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
