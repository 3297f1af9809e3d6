use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::benches::{cpu, memory, WorkloadFn};
use crate::harness::BenchConfig;
use crate::schema::WorkloadResult;
use crate::{Workload, WorkloadGroup};

pub struct SuiteEntry {
    pub workload: Workload,
    pub run: WorkloadFn,
}

/// Execution order of the suite. Results are reported in this order.
pub const SUITE: [SuiteEntry; 7] = [
    SuiteEntry {
        workload: Workload::PrimeNumbers,
        run: cpu::prime_numbers,
    },
    SuiteEntry {
        workload: Workload::MatrixMultiplication,
        run: cpu::matrix_multiplication,
    },
    SuiteEntry {
        workload: Workload::CryptographicHashing,
        run: cpu::cryptographic_hashing,
    },
    SuiteEntry {
        workload: Workload::MathOperations,
        run: cpu::math_operations,
    },
    SuiteEntry {
        workload: Workload::LargeArraySort,
        run: memory::large_array_sort,
    },
    SuiteEntry {
        workload: Workload::MemoryAllocation,
        run: memory::memory_allocation,
    },
    SuiteEntry {
        workload: Workload::StringConcatenation,
        run: memory::string_concatenation,
    },
];

/// Every workload once, sequentially, in [`SUITE`] order.
///
/// A workload that cannot run comes back as a skipped result; it never stops
/// the ones after it.
pub fn run_all(cfg: &BenchConfig) -> Vec<WorkloadResult> {
    let mut results = Vec::with_capacity(SUITE.len());
    let mut current_group = None;

    for (position, entry) in SUITE.iter().enumerate() {
        let group = entry.workload.group();
        if current_group != Some(group) {
            match group {
                WorkloadGroup::Cpu => tracing::info!("Running CPU-intensive benchmarks..."),
                WorkloadGroup::Memory => tracing::info!("Running memory-intensive benchmarks..."),
            }
            current_group = Some(group);
        }

        let mut rng = cfg.rng(position);
        let result = (entry.run)(cfg, &mut rng);
        tracing::debug!(
            workload = %result.name,
            duration_ns = result.duration_ns,
            operations = result.operations,
            "workload finished"
        );
        results.push(result);
    }

    results
}

/// One complete suite run.
#[derive(Clone, Debug)]
pub struct SuiteRun {
    pub started_at: DateTime<Utc>,
    pub results: Vec<WorkloadResult>,
    /// Wall time around the whole sequence, independent of per-workload timers.
    pub total: Duration,
}

pub fn run_suite(cfg: &BenchConfig) -> SuiteRun {
    let started_at = Utc::now();
    tracing::info!(
        profile = cfg.profile.as_str(),
        seed = ?cfg.seed,
        "starting benchmark suite"
    );

    let start = Instant::now();
    let results = run_all(cfg);
    let total = start.elapsed();

    SuiteRun {
        started_at,
        results,
        total,
    }
}
