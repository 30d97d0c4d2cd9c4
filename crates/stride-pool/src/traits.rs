//! The seam between attribute accessors and the pool that stores records.

use stride_core::PoolId;

/// Byte-level record access plus change notification.
///
/// Implemented by [`Pool`](crate::Pool). Attribute accessors are written
/// against this trait only: they resolve the proxy's index through the
/// store on every call, so they never hold on to backend memory.
pub trait RecordStore {
    /// Identity of the store, compared against a proxy's owner.
    fn pool_id(&self) -> PoolId;

    /// Bytes of record `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the backend.
    fn record(&self, index: u64) -> &[u8];

    /// Mutable bytes of record `index`. Writing here is a quiet write.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the backend.
    fn record_mut(&mut self, index: u64) -> &mut [u8];

    /// Fire `before_change` on every change listener for record `index`.
    fn notify_before(&mut self, index: u64);

    /// Fire `after_change` on every change listener for record `index`.
    fn notify_after(&mut self, index: u64);

    /// Run `write` as one logical change: one before/after pair around
    /// any number of quiet writes.
    fn modify<T>(&mut self, index: u64, write: impl FnOnce(&mut [u8]) -> T) -> T
    where
        Self: Sized,
    {
        self.notify_before(index);
        let out = write(self.record_mut(index));
        self.notify_after(index);
        out
    }
}
