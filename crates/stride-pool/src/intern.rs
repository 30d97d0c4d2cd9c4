//! Canonical id assignment for interned keys.
//!
//! Structures built on top of a pool often need one canonical record per
//! distinct value (one vertex per coordinate, one label per string).
//! [`CanonicalIds`] hands out ids under a lock around check-then-insert, so
//! concurrent callers interning the same key always agree on one id.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;

/// Thread-safe key → canonical id table.
///
/// Ids minted by [`intern`](Self::intern) are sequential and never reused,
/// even after [`remove`](Self::remove).
#[derive(Debug)]
pub struct CanonicalIds<K> {
    inner: Mutex<Table<K>>,
}

#[derive(Debug)]
struct Table<K> {
    entries: IndexMap<K, u64>,
    next: u64,
}

impl<K: Hash + Eq> CanonicalIds<K> {
    /// Empty table.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Table {
                entries: IndexMap::new(),
                next: 0,
            }),
        }
    }

    // Every mutation is a single insert or remove, so a poisoned table is
    // still consistent.
    fn lock(&self) -> MutexGuard<'_, Table<K>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Canonical id for `key`, calling `assign` to mint one if the key is
    /// new. `assign` runs at most once per key, under the lock.
    ///
    /// Typically `assign` creates a pool record and returns its id. Such ids
    /// do not advance the sequential counter used by [`intern`](Self::intern),
    /// so use one style per table.
    pub fn intern_with(&self, key: K, assign: impl FnOnce() -> u64) -> u64 {
        *self.lock().entries.entry(key).or_insert_with(assign)
    }

    /// Canonical id for `key`; new keys get the next sequential id.
    pub fn intern(&self, key: K) -> u64 {
        let mut table = self.lock();
        let Table { entries, next } = &mut *table;
        *entries.entry(key).or_insert_with(|| {
            let id = *next;
            *next += 1;
            id
        })
    }

    /// Id previously assigned to `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().entries.get(key).copied()
    }

    /// Forget `key`. Returns its id if it was interned.
    pub fn remove<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().entries.shift_remove(key)
    }

    /// Number of interned keys.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether no key is interned.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }
}

impl<K: Hash + Eq> Default for CanonicalIds<K> {
    fn default() -> Self {
        Self::new()
    }
}
