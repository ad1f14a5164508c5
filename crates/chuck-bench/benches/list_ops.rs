//! Criterion micro-benchmarks for list workloads under each strategy.

use std::hint::black_box;

use chuck_bench::{build_list, scrambled};
use chuck_pool::{ChuckAllocator, HeapAllocator};
use criterion::{criterion_group, criterion_main, Criterion};

/// Benchmark: build a 10K-element list with nodes from a pool.
fn bench_list_build_pool(c: &mut Criterion) {
    let values = scrambled(10_000, u64::MAX, 42);
    c.bench_function("list_build_10k_pool", |b| {
        b.iter(|| black_box(build_list(&values, ChuckAllocator::new())));
    });
}

/// Benchmark: build a 10K-element list with nodes from the heap.
fn bench_list_build_heap(c: &mut Criterion) {
    let values = scrambled(10_000, u64::MAX, 42);
    c.bench_function("list_build_10k_heap", |b| {
        b.iter(|| black_box(build_list(&values, HeapAllocator::new())));
    });
}

/// Benchmark: sort a 10K-element pool-backed list.
fn bench_list_sort_pool(c: &mut Criterion) {
    let values = scrambled(10_000, 1_000, 7);
    c.bench_function("list_sort_10k_pool", |b| {
        b.iter(|| {
            let mut list = build_list(&values, ChuckAllocator::new());
            list.sort();
            black_box(list.front().copied());
        });
    });
}

/// Benchmark: merge two sorted 5K-element lists sharing one pool.
fn bench_list_merge_shared_pool(c: &mut Criterion) {
    let mut left_values = scrambled(5_000, 1_000, 1);
    let mut right_values = scrambled(5_000, 1_000, 2);
    left_values.sort_unstable();
    right_values.sort_unstable();
    c.bench_function("list_merge_5k_5k_shared_pool", |b| {
        b.iter(|| {
            let mut left = build_list(&left_values, ChuckAllocator::new());
            let mut right = left.clone();
            right.clear();
            right.extend(right_values.iter().copied());
            left.merge(&mut right);
            black_box(left.len());
        });
    });
}

criterion_group!(
    benches,
    bench_list_build_pool,
    bench_list_build_heap,
    bench_list_sort_pool,
    bench_list_merge_shared_pool
);
criterion_main!(benches);
