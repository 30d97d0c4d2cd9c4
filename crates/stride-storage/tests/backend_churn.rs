//! Integration test: element pools over every backend under create/free churn.
//!
//! Drives the same deterministic allocation pattern through a heap, a mapped
//! and a multi-array backend and checks that they agree on every index they
//! hand out, that values written before growth survive it, and that capacity
//! stays bounded when the free list is recycled.

use std::collections::HashMap;

use stride_storage::{
    DynStorage, ElementPool, FreeListPolicy, HeapStorage, MultiArrayStorage, Storage, StorageError,
    StorageKind,
};

const RECORD_SIZE: usize = 12;

// ── Helpers ──────────────────────────────────────────────────────────

/// Deterministic churn: create three, free the middle one, repeat.
/// Returns the sequence of indices handed out.
fn churn<S: Storage>(pool: &mut ElementPool<S>, rounds: u64) -> Vec<u64> {
    let mut handed_out = Vec::new();
    for round in 0..rounds {
        let a = pool.create().unwrap();
        let b = pool.create().unwrap();
        let c = pool.create().unwrap();
        pool.storage_mut().write::<u64>(a, 0, round);
        pool.storage_mut().write::<u32>(c, 8, round as u32);
        pool.free_element(b).unwrap();
        handed_out.extend([a, b, c]);
    }
    handed_out
}

fn backends() -> Vec<ElementPool<DynStorage>> {
    [
        StorageKind::Heap,
        StorageKind::Mapped,
        StorageKind::MultiArray {
            elements_per_array: 7,
        },
    ]
    .iter()
    .map(|kind| {
        ElementPool::new(
            DynStorage::from_kind(kind, RECORD_SIZE, 2).unwrap(),
            FreeListPolicy::Reuse,
        )
    })
    .collect()
}

// ── Tests ────────────────────────────────────────────────────────────

#[test]
fn all_backends_allocate_identically() {
    let sequences: Vec<Vec<u64>> = backends()
        .iter_mut()
        .map(|pool| churn(pool, 200))
        .collect();
    assert_eq!(sequences[0], sequences[1]);
    assert_eq!(sequences[0], sequences[2]);
}

#[test]
fn churn_content_survives_growth() {
    for mut pool in backends() {
        let mut expected_u64 = HashMap::new();
        let mut expected_u32 = HashMap::new();
        for round in 0..300u64 {
            let a = pool.create().unwrap();
            let b = pool.create().unwrap();
            let c = pool.create().unwrap();
            pool.storage_mut().write::<u64>(a, 0, round);
            pool.storage_mut().write::<u32>(c, 8, round as u32 + 1);
            expected_u64.insert(a, round);
            expected_u32.insert(c, round as u32 + 1);
            pool.free_element(b).unwrap();
        }
        for (&index, &value) in &expected_u64 {
            assert_eq!(pool.storage().read::<u64>(index, 0), value);
        }
        for (&index, &value) in &expected_u32 {
            assert_eq!(pool.storage().read::<u32>(index, 8), value);
        }
        assert_eq!(pool.live_count(), pool.live_indices().count() as u64);
        assert!(pool.size() <= pool.capacity());
    }
}

#[test]
fn recycling_bounds_high_water_mark() {
    let mut pool = ElementPool::new(HeapStorage::new(RECORD_SIZE, 2).unwrap(), FreeListPolicy::Reuse);
    // Steady state: allocate 100, free all, repeat. Nothing past 100 is ever needed.
    for _ in 0..50 {
        let ids: Vec<u64> = (0..100).map(|_| pool.create().unwrap()).collect();
        for id in ids {
            pool.free_element(id).unwrap();
        }
    }
    assert_eq!(pool.size(), 100);
    assert_eq!(pool.live_count(), 0);
    assert_eq!(pool.free_count(), 100);
    assert!(pool.capacity() <= 128);
}

#[test]
fn append_only_keeps_growing() {
    let mut pool = ElementPool::new(HeapStorage::new(RECORD_SIZE, 2).unwrap(), FreeListPolicy::AppendOnly);
    for _ in 0..10 {
        let id = pool.create().unwrap();
        pool.free_element(id).unwrap();
    }
    assert_eq!(pool.size(), 10);
    assert_eq!(pool.live_count(), 0);
    pool.clear();
    assert_eq!(pool.create().unwrap(), 0);
}

#[test]
fn multi_array_pool_crosses_sub_array_boundaries() {
    let storage: MultiArrayStorage = MultiArrayStorage::new(8, 4, 1).unwrap();
    let mut pool = ElementPool::new(storage, FreeListPolicy::Reuse);
    for i in 0..37u64 {
        let id = pool.create().unwrap();
        assert_eq!(id, i);
        pool.storage_mut().write::<i64>(id, 0, -(i as i64));
    }
    assert_eq!(pool.capacity(), 64);
    assert_eq!(pool.storage().array_count(), 16);
    for i in 0..37u64 {
        assert_eq!(pool.storage().read::<i64>(i, 0), -(i as i64));
    }
    pool.swap(3, 33).unwrap();
    assert_eq!(pool.storage().read::<i64>(3, 0), -33);
    assert_eq!(pool.storage().read::<i64>(33, 0), -3);
}

#[test]
fn bounded_multi_array_reports_exhaustion() {
    let storage: MultiArrayStorage = MultiArrayStorage::with_max_arrays(8, 4, 0, 2).unwrap();
    let mut pool = ElementPool::new(storage, FreeListPolicy::Reuse);
    for _ in 0..8 {
        pool.create().unwrap();
    }
    assert_eq!(
        pool.create(),
        Err(StorageError::CapacityExceeded {
            requested: 9,
            max: 8
        })
    );
    // Freed slots remain usable after exhaustion.
    pool.free_element(5).unwrap();
    assert_eq!(pool.create().unwrap(), 5);
}
