use std::time::Duration;

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::harness::{self, BenchConfig};
use crate::suite::SuiteRun;

/// Numeric value carried by every field of a skipped workload.
pub const SKIPPED: i64 = -1;

/// `memory_bytes` value meaning "not measured".
pub const NOT_MEASURED: i64 = 0;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadResult {
    #[serde(alias = "test")]
    pub name: String,
    pub duration_ns: i64,
    #[serde(default)]
    pub memory_bytes: i64,
    pub operations: i64,
    pub ops_per_sec: f64,
    /// Present only on skipped workloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WorkloadResult {
    /// Build a result from a finished timed region.
    ///
    /// A zero elapsed time cannot produce a rate and yields a skipped result.
    pub fn measured(
        name: impl Into<String>,
        elapsed: Duration,
        memory_bytes: i64,
        operations: u64,
    ) -> Self {
        let name = name.into();
        let Some(rate) = harness::ops_per_sec(operations, elapsed) else {
            tracing::error!(workload = %name, "zero elapsed time; result discarded");
            return Self::skipped(name, "zero elapsed time");
        };

        Self {
            name,
            duration_ns: harness::duration_ns(elapsed),
            memory_bytes: memory_bytes.max(NOT_MEASURED),
            operations: i64::try_from(operations).unwrap_or(i64::MAX),
            ops_per_sec: rate,
            error: None,
        }
    }

    pub fn skipped(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration_ns: SKIPPED,
            memory_bytes: SKIPPED,
            operations: SKIPPED,
            ops_per_sec: SKIPPED as f64,
            error: Some(reason.into()),
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.error.is_some() || self.duration_ns < 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    #[serde(alias = "cpus")]
    pub cpu_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub language: String,
    pub timestamp: String,
    #[serde(default)]
    pub schema_version: u32,
    #[serde(default)]
    pub bench_version: String,
    #[serde(default)]
    pub profile: String,
    #[serde(default)]
    pub seed: Option<u64>,
    pub system: SystemInfo,
    pub tests: Vec<WorkloadResult>,
    pub total_time_seconds: f64,
}

impl Report {
    pub fn assemble(
        language: impl Into<String>,
        cfg: &BenchConfig,
        system: SystemInfo,
        run: SuiteRun,
    ) -> Self {
        Self {
            language: language.into(),
            timestamp: run.started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            schema_version: SCHEMA_VERSION,
            bench_version: env!("CARGO_PKG_VERSION").to_string(),
            profile: cfg.profile.as_str().to_string(),
            seed: cfg.seed,
            system,
            tests: run.results,
            total_time_seconds: run.total.as_secs_f64(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_measured_derives_rate() {
        let r = WorkloadResult::measured("x", Duration::from_millis(250), 4096, 1_000);
        assert_eq!(r.duration_ns, 250_000_000);
        assert_eq!(r.memory_bytes, 4096);
        assert_eq!(r.operations, 1_000);
        assert!((r.ops_per_sec - 4_000.0).abs() < 1e-9);
        assert!(!r.is_skipped());
    }

    #[test]
    fn test_zero_elapsed_becomes_skipped() {
        let r = WorkloadResult::measured("x", Duration::ZERO, 0, 10);
        assert!(r.is_skipped());
        assert_eq!(r.duration_ns, SKIPPED);
        assert_eq!(r.memory_bytes, SKIPPED);
        assert_eq!(r.operations, SKIPPED);
        assert_eq!(r.ops_per_sec, -1.0);
        assert_eq!(r.error.as_deref(), Some("zero elapsed time"));
    }

    #[test]
    fn test_error_field_omitted_when_absent() {
        let r = WorkloadResult::measured(
            "Prime Numbers (up to 100k)",
            Duration::from_secs(1),
            0,
            9592,
        );
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(
            v,
            json!({
                "name": "Prime Numbers (up to 100k)",
                "duration_ns": 1_000_000_000i64,
                "memory_bytes": 0,
                "operations": 9592,
                "ops_per_sec": 9592.0,
            })
        );

        let skipped =
            serde_json::to_value(WorkloadResult::skipped("m", "out of memory")).unwrap();
        assert_eq!(skipped["error"], "out of memory");
        assert_eq!(skipped["operations"], -1);
    }

    #[test]
    fn test_accepts_legacy_field_names() {
        let raw = r#"{
            "language": "go",
            "timestamp": "2024-01-01T00:00:00Z",
            "go_version": "go1.22",
            "system": {"os": "linux", "arch": "amd64", "cpus": 8},
            "tests": [
                {"test": "Prime Numbers (up to 100k)", "duration_ns": 5000000,
                 "memory_bytes": 0, "operations": 9592, "ops_per_sec": 1918400}
            ],
            "total_time_seconds": 1.5
        }"#;
        let report: Report = serde_json::from_str(raw).unwrap();
        assert_eq!(report.system.cpu_count, 8);
        assert_eq!(report.tests[0].name, "Prime Numbers (up to 100k)");
        assert_eq!(report.tests[0].error, None);
        assert_eq!(report.seed, None);
    }
}
