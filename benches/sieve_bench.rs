//! Benchmarks for the counting surface across a handful of range sizes and thread counts,
//! covering the small/medium/big bucket tiers (section 3) as the range grows.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use primesieve::{count_primes, count_twins, parallel_count_primes, SieveConfig};

fn bench_count_primes(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_primes");
    for &stop in &[100_000u64, 10_000_000, 1_000_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(stop), &stop, |b, &stop| {
            b.iter(|| count_primes(black_box(0), black_box(stop)));
        });
    }
    group.finish();
}

fn bench_count_twins(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_twins");
    for &stop in &[100_000u64, 10_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(stop), &stop, |b, &stop| {
            b.iter(|| count_twins(black_box(0), black_box(stop)));
        });
    }
    group.finish();
}

fn bench_parallel_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_count_primes_1e9");
    for &threads in &[1usize, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &threads| {
            b.iter(|| parallel_count_primes(black_box(0), black_box(1_000_000_000), threads));
        });
    }
    group.finish();
}

fn bench_segment_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment_size_kb");
    for &kb in &[8u64, 32, 256, 1024] {
        let config = SieveConfig::default().with_segment_size_kb(kb);
        group.bench_with_input(BenchmarkId::from_parameter(kb), &config, |b, config| {
            b.iter(|| primesieve::count_primes_with_config(black_box(0), black_box(10_000_000), config));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_count_primes, bench_count_twins, bench_parallel_scaling, bench_segment_size);
criterion_main!(benches);
