use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::heap::HeapRegion;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Profile {
    /// Roughly a tenth of the canonical sizes; for smoke runs.
    Quick,
    /// Canonical sizes; the only profile whose results compare across implementations.
    #[default]
    Full,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Quick => "quick",
            Profile::Full => "full",
        }
    }
}

/// Per-workload sizes for one profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkloadParams {
    /// Primes are counted over `2..=prime_limit`.
    pub prime_limit: u32,
    pub matrix_size: usize,
    pub hash_buffer_len: usize,
    pub hash_iterations: u64,
    pub math_iterations: u64,
    pub sort_len: usize,
    /// Sort values are drawn from `0..=sort_max`.
    pub sort_max: i32,
    pub allocations: u64,
    /// Elements (`i32`) per allocated buffer.
    pub allocation_len: usize,
    pub string_iterations: u64,
}

impl WorkloadParams {
    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::Full => Self {
                prime_limit: 100_000,
                matrix_size: 500,
                hash_buffer_len: 1024,
                hash_iterations: 50_000,
                math_iterations: 10_000_000,
                sort_len: 1_000_000,
                sort_max: 1_000_000,
                allocations: 100_000,
                allocation_len: 256,
                string_iterations: 50_000,
            },
            Profile::Quick => Self {
                prime_limit: 10_000,
                matrix_size: 100,
                hash_buffer_len: 1024,
                hash_iterations: 5_000,
                math_iterations: 1_000_000,
                sort_len: 100_000,
                sort_max: 1_000_000,
                allocations: 10_000,
                allocation_len: 256,
                string_iterations: 5_000,
            },
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BenchConfig {
    pub profile: Profile,
    /// `None` seeds every workload generator from OS entropy.
    pub seed: Option<u64>,
    /// Heap cap consulted by the allocation workload before it starts.
    pub memory_budget_bytes: Option<u64>,
}

impl BenchConfig {
    pub fn params(&self) -> WorkloadParams {
        WorkloadParams::for_profile(self.profile)
    }

    /// Generator for the workload at `position` in the suite.
    pub fn rng(&self, position: usize) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(workload_seed(seed, position)),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

fn workload_seed(master_seed: u64, position: usize) -> u64 {
    master_seed
        .wrapping_add(position as u64)
        .wrapping_mul(0x517cc1b727220a95)
}

/// Outcome of one timed region.
#[derive(Clone, Debug)]
pub struct Measured<T> {
    pub value: T,
    pub elapsed: Duration,
    /// Peak heap growth inside the region, `0` when heap tracking is unavailable.
    pub memory_bytes: i64,
}

/// Time a single run of `f`. No warm-up, no repetition.
///
/// The heap region is opened before the clock starts and read after it stops, so
/// neither touches the measured span.
pub fn measure_once<T>(f: impl FnOnce() -> T) -> Measured<T> {
    let heap = HeapRegion::start();
    let start = Instant::now();
    let value = f();
    let elapsed = start.elapsed();
    let memory_bytes = heap.peak_growth_bytes();

    Measured {
        value,
        elapsed,
        memory_bytes,
    }
}

/// `operations / elapsed_seconds`, or `None` when nothing measurable elapsed.
pub fn ops_per_sec(operations: u64, elapsed: Duration) -> Option<f64> {
    if elapsed.is_zero() {
        return None;
    }
    Some(operations as f64 / elapsed.as_secs_f64())
}

pub fn duration_ns(elapsed: Duration) -> i64 {
    i64::try_from(elapsed.as_nanos()).unwrap_or(i64::MAX)
}
