//! Kernel-level benchmarks for the suite workloads
//!
//! The suite itself is single-shot; these criterion groups give repeated,
//! statistically summarized timings of the same kernels at reduced sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use crosslang_bench::benches::{cpu, memory};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_cpu_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("cpu");

    for limit in [1_000u32, 10_000] {
        group.bench_with_input(BenchmarkId::new("count_primes", limit), &limit, |b, &limit| {
            b.iter(|| black_box(cpu::count_primes(black_box(limit))))
        });
    }

    for n in [32usize, 64] {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let a = cpu::random_matrix(&mut rng, n);
        let m = cpu::random_matrix(&mut rng, n);
        group.bench_with_input(BenchmarkId::new("multiply", n), &n, |b, &n| {
            b.iter(|| black_box(cpu::multiply(black_box(&a), black_box(&m), n)))
        });
    }

    let data = vec![0xA5u8; 1024];
    group.bench_function("sha256_1kb_x100", |b| {
        b.iter(|| black_box(cpu::hash_repeatedly(black_box(&data), 100)))
    });

    group.bench_function("trig_accumulate_10k", |b| {
        b.iter(|| black_box(cpu::accumulate_trig(black_box(10_000))))
    });

    group.finish();
}

fn bench_memory_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("memory");
    group.sample_size(20);

    group.bench_function("sorted_random_array_100k", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        b.iter(|| black_box(memory::sorted_random_array(&mut rng, 100_000, 1_000_000)))
    });

    group.bench_function("retain_buffers_10k", |b| {
        b.iter(|| black_box(memory::retain_buffers(10_000, 256)))
    });

    group.bench_function("concat_iterations_5k", |b| {
        b.iter(|| black_box(memory::concat_iterations(black_box(5_000))))
    });

    group.finish();
}

criterion_group!(benches, bench_cpu_kernels, bench_memory_kernels);
criterion_main!(benches);
