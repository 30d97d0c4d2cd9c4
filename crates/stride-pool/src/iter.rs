//! Iteration over live records.
//!
//! Two flavours:
//!
//! - [`LiveIds`] borrows the pool, so the borrow checker rules out
//!   structural changes while it runs.
//! - [`LiveCursor`] is detached. It can be stepped between mutations and
//!   fails with [`PoolError::ConcurrentModification`] if a record was
//!   created, deleted or the pool cleared since the cursor was made.
//!
//! Both yield live indices in ascending order and skip freed slots.

use stride_storage::{ElementPool, Storage};

use crate::error::PoolError;
use crate::pool::Pool;
use crate::proxy::Proxy;

/// Borrowing iterator over live record ids. See [`Pool::iter`].
pub struct LiveIds<'a, S: Storage> {
    elements: &'a ElementPool<S>,
    next: u64,
}

impl<'a, S: Storage> LiveIds<'a, S> {
    pub(crate) fn new(elements: &'a ElementPool<S>) -> Self {
        Self { elements, next: 0 }
    }
}

impl<S: Storage> Iterator for LiveIds<'_, S> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let id = self.elements.next_live(self.next)?;
        self.next = id + 1;
        Some(id)
    }
}

/// Detached cursor over live record ids. See [`Pool::cursor`].
#[derive(Clone, Debug)]
pub struct LiveCursor {
    next: u64,
    version: u64,
}

impl LiveCursor {
    pub(crate) fn new(version: u64) -> Self {
        Self { next: 0, version }
    }

    /// Point `proxy` at the next live record and return its id.
    ///
    /// Returns `Ok(None)` once every live record has been visited.
    pub fn advance<S: Storage>(
        &mut self,
        pool: &Pool<S>,
        proxy: &mut Proxy,
    ) -> Result<Option<u64>, PoolError> {
        let Some(id) = self.advance_id(pool)? else {
            return Ok(None);
        };
        pool.get_object(id, proxy)?;
        Ok(Some(id))
    }

    /// Return the next live id without touching a proxy.
    pub fn advance_id<S: Storage>(&mut self, pool: &Pool<S>) -> Result<Option<u64>, PoolError> {
        let found = pool.structural_version();
        if found != self.version {
            return Err(PoolError::ConcurrentModification {
                expected: self.version,
                found,
            });
        }
        let Some(id) = pool.elements().next_live(self.next) else {
            return Ok(None);
        };
        self.next = id + 1;
        Ok(Some(id))
    }
}

#[cfg(test)]
mod tests {
    use crate::attribute::Attribute;
    use crate::config::PoolConfig;
    use crate::error::PoolError;
    use crate::pool::Pool;
    use stride_core::LayoutBuilder;

    fn pool_with(n: i32) -> (Pool, Attribute<i32>) {
        let mut b = LayoutBuilder::new();
        let value = Attribute::new(b.scalar::<i32>("value"));
        let mut pool = Pool::with_config(b.build().unwrap(), PoolConfig::new()).unwrap();
        let mut p = pool.proxy();
        for v in 0..n {
            pool.create(&mut p).unwrap();
            value.set_quiet(&mut pool, &p, v);
        }
        (pool, value)
    }

    #[test]
    fn iter_skips_freed_and_restarts() {
        let (mut pool, _) = pool_with(6);
        pool.delete_id(1).unwrap();
        pool.delete_id(4).unwrap();
        assert_eq!(pool.iter().collect::<Vec<_>>(), vec![0, 2, 3, 5]);
        assert_eq!(pool.iter().collect::<Vec<_>>(), vec![0, 2, 3, 5]);
    }

    #[test]
    fn cursor_allows_field_writes_between_steps() {
        let (mut pool, value) = pool_with(3);
        let mut cursor = pool.cursor();
        let mut p = pool.proxy();
        let mut seen = Vec::new();
        while let Some(id) = cursor.advance(&pool, &mut p).unwrap() {
            let current = value.get(&pool, &p);
            value.set(&mut pool, &p, current * 10);
            seen.push(id);
        }
        assert_eq!(seen, vec![0, 1, 2]);
        let values: Vec<i32> = pool
            .iter()
            .map(|id| {
                pool.get_object(id, &mut p).unwrap();
                value.get(&pool, &p)
            })
            .collect();
        assert_eq!(values, vec![0, 10, 20]);
    }

    #[test]
    fn cursor_detects_deletion() {
        let (mut pool, _) = pool_with(3);
        let mut cursor = pool.cursor();
        assert_eq!(cursor.advance_id(&pool).unwrap(), Some(0));
        pool.delete_id(2).unwrap();
        assert!(matches!(
            cursor.advance_id(&pool),
            Err(PoolError::ConcurrentModification { .. })
        ));
    }

    #[test]
    fn cursor_detects_creation() {
        let (mut pool, _) = pool_with(1);
        let mut cursor = pool.cursor();
        let mut p = pool.proxy();
        pool.create(&mut p).unwrap();
        assert!(matches!(
            cursor.advance(&pool, &mut p),
            Err(PoolError::ConcurrentModification { .. })
        ));
    }
}
