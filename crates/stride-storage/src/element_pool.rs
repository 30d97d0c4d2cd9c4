//! Slab allocator over a storage backend.
//!
//! [`ElementPool`] owns one [`Storage`] and hands out element indices. It
//! keeps three disjoint index classes at all times:
//!
//! - **live**: allocated and not yet freed (tracked in a [`LiveSet`]),
//! - **free**: below the high-water mark but released (the free list),
//! - **never allocated**: at or above the high-water mark.
//!
//! Growth doubles the backend's length (clamped to its maximum) whenever an
//! append reaches capacity. Existing indices are never moved by growth.

use crate::config::FreeListPolicy;
use crate::error::StorageError;
use crate::live::LiveSet;
use crate::storage::Storage;

/// Free-list slab over a fixed-stride backend.
#[derive(Debug)]
pub struct ElementPool<S: Storage> {
    storage: S,
    /// High-water mark: one past the largest index ever handed out.
    size: u64,
    /// Released indices, most recent last.
    free_list: Vec<u64>,
    live: LiveSet,
    policy: FreeListPolicy,
    /// Bumped on every structural change (allocation, free, clear).
    version: u64,
}

impl<S: Storage> ElementPool<S> {
    /// Wrap a backend. All of its current elements count as never allocated.
    pub fn new(storage: S, policy: FreeListPolicy) -> Self {
        Self {
            storage,
            size: 0,
            free_list: Vec::new(),
            live: LiveSet::new(),
            policy,
            version: 0,
        }
    }

    /// Allocate a new index at the high-water mark, growing if at capacity.
    ///
    /// Content of the new element is whatever the backend holds there
    /// (zero for never-touched storage, stale bytes after [`clear`](Self::clear)).
    pub fn append(&mut self) -> Result<u64, StorageError> {
        if self.size == self.storage.len() {
            self.grow_for(self.size + 1)?;
        }
        let index = self.size;
        self.size += 1;
        self.live.insert(index);
        self.version += 1;
        Ok(index)
    }

    /// Allocate an index, recycling a freed one when the policy allows.
    pub fn create(&mut self) -> Result<u64, StorageError> {
        if self.policy == FreeListPolicy::Reuse {
            if let Some(index) = self.free_list.pop() {
                self.live.insert(index);
                self.version += 1;
                return Ok(index);
            }
        }
        self.append()
    }

    /// Release a live index to the free list. Content is left untouched.
    pub fn free_element(&mut self, index: u64) -> Result<(), StorageError> {
        if !self.live.remove(index) {
            return Err(StorageError::NotLive { index });
        }
        self.free_list.push(index);
        self.version += 1;
        Ok(())
    }

    /// Exchange the byte contents of two elements below the high-water mark.
    ///
    /// Liveness stays with the index, not with the content.
    pub fn swap(&mut self, a: u64, b: u64) -> Result<(), StorageError> {
        for index in [a, b] {
            if index >= self.size {
                return Err(StorageError::IndexOutOfRange {
                    index,
                    size: self.size,
                });
            }
        }
        self.storage.swap_elements(a, b);
        Ok(())
    }

    /// Forget every allocation. All previously returned indices become
    /// invalid; backend memory is kept for reuse and not zeroed.
    pub fn clear(&mut self) {
        tracing::debug!(
            high_water = self.size,
            live = self.live.len(),
            "clearing element pool"
        );
        self.size = 0;
        self.free_list.clear();
        self.live.clear();
        self.version += 1;
    }

    /// Ensure the backend can address at least `capacity` elements.
    pub fn reserve(&mut self, capacity: u64) -> Result<(), StorageError> {
        if capacity <= self.storage.len() {
            return Ok(());
        }
        self.resize_storage(capacity)
    }

    fn grow_for(&mut self, required: u64) -> Result<(), StorageError> {
        let max = self.storage.max_len();
        if required > max {
            tracing::error!(
                requested = required,
                max,
                element_size = self.storage.element_size(),
                "element pool exhausted its backend's maximum size"
            );
            return Err(StorageError::CapacityExceeded {
                requested: required,
                max,
            });
        }
        let doubled = self.storage.len().max(1).saturating_mul(2);
        self.resize_storage(doubled.clamp(required, max))
    }

    fn resize_storage(&mut self, new_len: u64) -> Result<(), StorageError> {
        let old_len = self.storage.len();
        self.storage.resize(new_len).inspect_err(|err| {
            tracing::error!(old_len, new_len, %err, "element storage resize failed");
        })?;
        tracing::debug!(
            old_len,
            new_len,
            bytes = self.storage.memory_bytes(),
            "grew element storage"
        );
        Ok(())
    }

    /// Whether `index` is currently allocated.
    #[inline]
    pub fn is_live(&self, index: u64) -> bool {
        self.live.contains(index)
    }

    /// High-water mark.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of live elements.
    pub fn live_count(&self) -> u64 {
        self.live.len()
    }

    /// Number of freed elements below the high-water mark.
    pub fn free_count(&self) -> u64 {
        self.free_list.len() as u64
    }

    /// Number of elements the backend can address without growing.
    pub fn capacity(&self) -> u64 {
        self.storage.len()
    }

    /// Structural version; changes on every allocation, free and clear.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Active free-list policy.
    pub fn policy(&self) -> FreeListPolicy {
        self.policy
    }

    /// Smallest live index `>= from`.
    pub fn next_live(&self, from: u64) -> Option<u64> {
        self.live.next_from(from)
    }

    /// Live indices in ascending order.
    pub fn live_indices(&self) -> impl Iterator<Item = u64> + '_ {
        self.live.iter()
    }

    /// Freed indices, most recently freed last.
    pub fn free_indices(&self) -> &[u64] {
        &self.free_list
    }

    /// The backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The backend, mutably. Callers must not shrink or reorder it.
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::HeapStorage;

    fn pool(capacity: u64) -> ElementPool<HeapStorage> {
        ElementPool::new(HeapStorage::new(4, capacity).unwrap(), FreeListPolicy::Reuse)
    }

    #[test]
    fn append_assigns_sequential_indices() {
        let mut p = pool(4);
        assert_eq!(p.append().unwrap(), 0);
        assert_eq!(p.append().unwrap(), 1);
        assert_eq!(p.size(), 2);
        assert_eq!(p.live_count(), 2);
    }

    #[test]
    fn append_doubles_capacity() {
        let mut p = pool(2);
        for _ in 0..3 {
            p.append().unwrap();
        }
        assert_eq!(p.capacity(), 4);
        p.append().unwrap();
        p.append().unwrap();
        assert_eq!(p.capacity(), 8);
    }

    #[test]
    fn grows_from_zero_capacity() {
        let mut p = pool(0);
        assert_eq!(p.append().unwrap(), 0);
        assert!(p.capacity() >= 1);
    }

    #[test]
    fn create_reuses_most_recent_free() {
        let mut p = pool(4);
        for _ in 0..4 {
            p.create().unwrap();
        }
        p.free_element(1).unwrap();
        p.free_element(3).unwrap();
        assert_eq!(p.create().unwrap(), 3);
        assert_eq!(p.create().unwrap(), 1);
        assert_eq!(p.create().unwrap(), 4);
    }

    #[test]
    fn append_only_never_reuses() {
        let mut p = ElementPool::new(HeapStorage::new(4, 4).unwrap(), FreeListPolicy::AppendOnly);
        p.create().unwrap();
        p.free_element(0).unwrap();
        assert_eq!(p.create().unwrap(), 1);
        assert_eq!(p.free_count(), 1);
        assert!(!p.is_live(0));
    }

    #[test]
    fn double_free_rejected() {
        let mut p = pool(2);
        p.create().unwrap();
        p.free_element(0).unwrap();
        assert_eq!(p.free_element(0), Err(StorageError::NotLive { index: 0 }));
        assert_eq!(p.free_element(7), Err(StorageError::NotLive { index: 7 }));
        assert_eq!(p.free_count(), 1);
    }

    #[test]
    fn free_does_not_zero_content() {
        let mut p = pool(2);
        let i = p.create().unwrap();
        p.storage_mut().write::<u32>(i, 0, 1234);
        p.free_element(i).unwrap();
        let j = p.create().unwrap();
        assert_eq!(i, j);
        assert_eq!(p.storage().read::<u32>(j, 0), 1234);
    }

    #[test]
    fn swap_exchanges_content_not_liveness() {
        let mut p = pool(4);
        let a = p.create().unwrap();
        let b = p.create().unwrap();
        p.storage_mut().write::<i32>(a, 0, 1);
        p.storage_mut().write::<i32>(b, 0, 2);
        p.free_element(b).unwrap();
        p.swap(a, b).unwrap();
        assert_eq!(p.storage().read::<i32>(a, 0), 2);
        assert_eq!(p.storage().read::<i32>(b, 0), 1);
        assert!(p.is_live(a));
        assert!(!p.is_live(b));
    }

    #[test]
    fn swap_past_high_water_rejected() {
        let mut p = pool(4);
        p.create().unwrap();
        assert_eq!(
            p.swap(0, 2),
            Err(StorageError::IndexOutOfRange { index: 2, size: 1 })
        );
    }

    #[test]
    fn clear_resets_everything() {
        let mut p = pool(4);
        for _ in 0..3 {
            p.create().unwrap();
        }
        p.free_element(1).unwrap();
        let before = p.version();
        p.clear();
        assert_eq!(p.size(), 0);
        assert_eq!(p.live_count(), 0);
        assert_eq!(p.free_count(), 0);
        assert_eq!(p.capacity(), 4);
        assert!(p.version() > before);
        assert_eq!(p.create().unwrap(), 0);
    }

    #[test]
    fn capacity_exhaustion_is_reported() {
        let storage = HeapStorage::with_max_bytes(4, 1, 12).unwrap();
        let mut p = ElementPool::new(storage, FreeListPolicy::Reuse);
        for _ in 0..3 {
            p.append().unwrap();
        }
        assert_eq!(p.capacity(), 3);
        assert_eq!(
            p.append(),
            Err(StorageError::CapacityExceeded {
                requested: 4,
                max: 3
            })
        );
        assert_eq!(p.size(), 3);
        assert_eq!(p.live_count(), 3);
    }

    #[test]
    fn reserve_grows_without_allocating() {
        let mut p = pool(1);
        p.reserve(50).unwrap();
        assert_eq!(p.capacity(), 50);
        assert_eq!(p.size(), 0);
    }

    #[test]
    fn version_tracks_structural_changes() {
        let mut p = pool(4);
        let v0 = p.version();
        let i = p.create().unwrap();
        let v1 = p.version();
        assert!(v1 > v0);
        p.swap(i, i).unwrap();
        assert_eq!(p.version(), v1);
        p.free_element(i).unwrap();
        assert!(p.version() > v1);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::BTreeSet;

        proptest! {
            #[test]
            fn live_free_and_unallocated_partition_indices(
                ops in proptest::collection::vec((any::<bool>(), 0usize..64), 1..200),
            ) {
                let mut p = pool(2);
                let mut live: BTreeSet<u64> = BTreeSet::new();
                for (create, pick) in ops {
                    if create || live.is_empty() {
                        let i = p.create().unwrap();
                        prop_assert!(live.insert(i), "index {} handed out twice", i);
                    } else {
                        let victim = *live.iter().nth(pick % live.len()).unwrap();
                        live.remove(&victim);
                        p.free_element(victim).unwrap();
                    }

                    let free: BTreeSet<u64> = p.free_indices().iter().copied().collect();
                    prop_assert_eq!(free.len() as u64, p.free_count());
                    prop_assert!(free.is_disjoint(&live));
                    prop_assert_eq!(live.len() as u64 + free.len() as u64, p.size());
                    prop_assert!(free.iter().chain(live.iter()).all(|&i| i < p.size()));
                    prop_assert_eq!(p.live_indices().collect::<Vec<_>>(), live.iter().copied().collect::<Vec<_>>());
                }
            }

            #[test]
            fn growth_preserves_written_values(n in 1u64..500) {
                let mut p = pool(1);
                for _ in 0..n {
                    let i = p.create().unwrap();
                    p.storage_mut().write::<u32>(i, 0, i as u32 * 3);
                }
                for i in 0..n {
                    prop_assert_eq!(p.storage().read::<u32>(i, 0), i as u32 * 3);
                }
            }
        }
    }
}
