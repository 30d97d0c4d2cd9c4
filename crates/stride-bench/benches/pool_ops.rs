//! Criterion micro-benchmarks for pool create/delete churn, field access and iteration.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stride_bench::{churn_schedule, particle_pool};
use stride_storage::StorageKind;
use stride_test_utils::CountingListener;

/// Benchmark: Create 10K records into an empty pool that starts at capacity 1.
fn bench_create_10k(c: &mut Criterion) {
    c.bench_function("pool_create_10k", |b| {
        b.iter(|| {
            let (pool, _) = particle_pool(10_000, StorageKind::Heap).unwrap();
            black_box(pool.len());
        });
    });
}

/// Benchmark: Delete a quarter of 10K records then recreate them from the free list.
fn bench_churn_10k(c: &mut Criterion) {
    let (mut pool, _) = particle_pool(10_000, StorageKind::Heap).unwrap();
    let schedule = churn_schedule(10_000, 4, 7);
    let mut p = pool.create_ref();
    c.bench_function("pool_churn_10k", |b| {
        b.iter(|| {
            for &id in &schedule {
                pool.delete_id(id).unwrap();
            }
            for _ in 0..schedule.len() {
                pool.create(&mut p).unwrap();
            }
            black_box(pool.high_water_mark());
        });
    });
}

/// Benchmark: Quiet position write across 10K records.
fn bench_write_quiet_10k(c: &mut Criterion) {
    let (mut pool, fields) = particle_pool(10_000, StorageKind::Heap).unwrap();
    let mut p = pool.create_ref();
    c.bench_function("pool_write_quiet_10k", |b| {
        b.iter(|| {
            let mut cursor = pool.cursor();
            while cursor.advance(&pool, &mut p).unwrap().is_some() {
                fields.pos.move_by(&mut pool, &p, &[0.5, 0.0, 0.0]);
            }
        });
    });
}

/// Benchmark: Same sweep with a change listener attached.
fn bench_write_notify_10k(c: &mut Criterion) {
    let (mut pool, fields) = particle_pool(10_000, StorageKind::Heap).unwrap();
    let (listener, counts) = CountingListener::new();
    pool.subscribe_changes(listener);
    let mut p = pool.create_ref();
    c.bench_function("pool_write_notify_10k", |b| {
        b.iter(|| {
            let mut cursor = pool.cursor();
            while cursor.advance(&pool, &mut p).unwrap().is_some() {
                fields.pos.move_by(&mut pool, &p, &[0.5, 0.0, 0.0]);
            }
        });
    });
    black_box(counts.after());
}

/// Benchmark: Sum one field over 10K records with a hole every few ids.
fn bench_iterate_sparse_10k(c: &mut Criterion) {
    let (mut pool, fields) = particle_pool(10_000, StorageKind::Heap).unwrap();
    for id in churn_schedule(10_000, 3, 11) {
        pool.delete_id(id).unwrap();
    }
    let mut p = pool.create_ref();
    c.bench_function("pool_iterate_sparse_10k", |b| {
        b.iter(|| {
            let mut total = 0.0f32;
            for id in pool.iter() {
                pool.get_object(id, &mut p).unwrap();
                total += fields.mass.get(&pool, &p);
            }
            black_box(total);
        });
    });
}

criterion_group!(
    benches,
    bench_create_10k,
    bench_churn_10k,
    bench_write_quiet_10k,
    bench_write_notify_10k,
    bench_iterate_sparse_10k
);
criterion_main!(benches);
