//! Memory management benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_memory_allocation(c: &mut Criterion) {
    // TODO: Implement memory allocation benchmark
}

fn bench_memory_deallocation(c: &mut Criterion) {
    // TODO: Implement memory deallocation benchmark
}

fn bench_page_table_operations(c: &mut Criterion) {
    // TODO: Implement page table operations benchmark
}

fn bench_memory_mapping(c: &mut Criterion) {
    // TODO: Implement memory mapping benchmark
}

criterion_group!(
    benches,
    bench_memory_allocation,
    bench_memory_deallocation,
    bench_page_table_operations,
    bench_memory_mapping
);

criterion_main!(benches);