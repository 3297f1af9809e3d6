use serde::{Deserialize, Serialize};

pub mod benches;
pub mod compare;
pub mod error;
pub mod harness;
pub mod heap;
pub mod output;
pub mod schema;
pub mod suite;
pub mod sysinfo;

pub use error::{BenchError, Result};

/// One of the seven fixed workloads of the suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Workload {
    /// Trial-division prime count.
    PrimeNumbers,
    /// Naive triple-loop product of two random square matrices.
    MatrixMultiplication,
    /// Repeated SHA-256 digest of one random buffer.
    CryptographicHashing,
    /// `sin(i) * cos(i) * sqrt(i + 1)` accumulation.
    MathOperations,
    /// Generate and sort a large random integer array.
    LargeArraySort,
    /// Many small retained heap buffers.
    MemoryAllocation,
    /// Grow one string from many formatted fragments.
    StringConcatenation,
}

/// CPU-bound workloads run first, then the memory-bound ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkloadGroup {
    Cpu,
    Memory,
}

impl Workload {
    pub fn group(&self) -> WorkloadGroup {
        match self {
            Workload::PrimeNumbers
            | Workload::MatrixMultiplication
            | Workload::CryptographicHashing
            | Workload::MathOperations => WorkloadGroup::Cpu,
            Workload::LargeArraySort
            | Workload::MemoryAllocation
            | Workload::StringConcatenation => WorkloadGroup::Memory,
        }
    }

    /// Only the allocation workload may reduce its scale or skip itself.
    pub fn may_degrade(&self) -> bool {
        matches!(self, Workload::MemoryAllocation)
    }
}

/// Format a count the way report names show it (`100k`, `10M`, `500`).
pub fn format_count(count: u64) -> String {
    match count {
        n if n >= 1_000_000 && n % 1_000_000 == 0 => format!("{}M", n / 1_000_000),
        n if n >= 1_000 && n % 1_000 == 0 => format!("{}k", n / 1_000),
        n => n.to_string(),
    }
}
