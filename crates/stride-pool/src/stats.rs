//! Point-in-time pool statistics.

/// Snapshot of a pool's occupancy and memory use.
///
/// Produced by [`Pool::stats`](crate::Pool::stats). Proxy counters are
/// cumulative over the pool's lifetime.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Live records.
    pub live: u64,
    /// Freed records below the high-water mark.
    pub free: u64,
    /// One past the largest index ever handed out.
    pub high_water_mark: u64,
    /// Records the backend can hold without growing.
    pub capacity: u64,
    /// Size of one record in bytes.
    pub record_size: usize,
    /// Bytes held by the backend.
    pub memory_bytes: usize,
    /// Proxies minted by the pool.
    pub proxies_allocated: u64,
    /// Proxies served from the recycling queue.
    pub proxies_recycled: u64,
    /// Subscribed change and lifecycle listeners.
    pub listeners: usize,
}

impl PoolStats {
    /// Fraction of the backend's capacity occupied by live records.
    pub fn occupancy(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.live as f64 / self.capacity as f64
        }
    }
}
