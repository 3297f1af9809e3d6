//! The seven workloads. Each one owns its timed region and returns a finished
//! [`WorkloadResult`]; the suite only sequences them.

use rand_chacha::ChaCha8Rng;

use crate::harness::{BenchConfig, WorkloadParams};
use crate::schema::WorkloadResult;
use crate::{format_count, Workload};


/// Signature shared by every workload entry point.
pub type WorkloadFn = fn(&BenchConfig, &mut ChaCha8Rng) -> WorkloadResult;

/// Report name for a workload at the given sizes, e.g. `Matrix Multiplication (500x500)`.
pub fn display_name(workload: Workload, p: &WorkloadParams) -> String {
    match workload {
        Workload::PrimeNumbers => {
            format!("Prime Numbers (up to {})", format_count(u64::from(p.prime_limit)))
        }
        Workload::MatrixMultiplication => {
            format!("Matrix Multiplication ({0}x{0})", p.matrix_size)
        }
        Workload::CryptographicHashing => {
            format!("SHA256 Hashing ({} iterations)", format_count(p.hash_iterations))
        }
        Workload::MathOperations => {
            format!("Math Operations ({} iterations)", format_count(p.math_iterations))
        }
        Workload::LargeArraySort => {
            format!("Large Array Sort ({} elements)", format_count(p.sort_len as u64))
        }
        Workload::MemoryAllocation => format!(
            "Memory Allocation ({} x {}KB)",
            format_count(p.allocations),
            p.allocation_len * std::mem::size_of::<i32>() / 1024
        ),
        Workload::StringConcatenation => format!(
            "String Concatenation ({} iterations)",
            format_count(p.string_iterations)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::Profile;

    #[test]
    fn test_full_profile_names() {
        let p = WorkloadParams::for_profile(Profile::Full);
        let names: Vec<String> = [
            Workload::PrimeNumbers,
            Workload::MatrixMultiplication,
            Workload::CryptographicHashing,
            Workload::MathOperations,
            Workload::LargeArraySort,
            Workload::MemoryAllocation,
            Workload::StringConcatenation,
        ]
        .into_iter()
        .map(|w| display_name(w, &p))
        .collect();

        assert_eq!(
            names,
            vec![
                "Prime Numbers (up to 100k)",
                "Matrix Multiplication (500x500)",
                "SHA256 Hashing (50k iterations)",
                "Math Operations (10M iterations)",
                "Large Array Sort (1M elements)",
                "Memory Allocation (100k x 1KB)",
                "String Concatenation (50k iterations)",
            ]
        );
    }

    #[test]
    fn test_quick_names_differ_from_full() {
        let quick = WorkloadParams::for_profile(Profile::Quick);
        let full = WorkloadParams::for_profile(Profile::Full);
        assert_ne!(
            display_name(Workload::PrimeNumbers, &quick),
            display_name(Workload::PrimeNumbers, &full)
        );
    }
}
