//! Pool construction options.

use stride_storage::{FreeListPolicy, StorageKind};

use crate::error::PoolError;

/// Construction-time configuration for a [`Pool`](crate::Pool).
///
/// ```
/// use stride_pool::PoolConfig;
/// use stride_storage::{FreeListPolicy, StorageKind};
///
/// let config = PoolConfig::new()
///     .with_initial_capacity(1024)
///     .with_storage(StorageKind::Mapped)
///     .with_free_list(FreeListPolicy::AppendOnly);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Elements allocated up front. Default: 16.
    pub initial_capacity: u64,
    /// Physical backend. Default: [`StorageKind::Heap`].
    pub storage: StorageKind,
    /// Free-list policy. Default: [`FreeListPolicy::Reuse`].
    pub free_list: FreeListPolicy,
    /// Check liveness in [`Pool::get_object`](crate::Pool::get_object).
    /// Default: on in debug builds, off in release builds.
    pub validation: bool,
    /// Capacity of the proxy recycling queue. 0 disables recycling.
    /// Default: 16.
    pub proxy_cache: usize,
}

impl PoolConfig {
    /// Default number of elements allocated up front.
    pub const DEFAULT_INITIAL_CAPACITY: u64 = 16;

    /// Default capacity of the proxy recycling queue.
    pub const DEFAULT_PROXY_CACHE: usize = 16;

    /// Configuration with every option at its default.
    pub fn new() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            storage: StorageKind::default(),
            free_list: FreeListPolicy::default(),
            validation: cfg!(debug_assertions),
            proxy_cache: Self::DEFAULT_PROXY_CACHE,
        }
    }

    /// Set the number of elements allocated up front.
    pub fn with_initial_capacity(mut self, initial_capacity: u64) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Set the physical backend.
    pub fn with_storage(mut self, storage: StorageKind) -> Self {
        self.storage = storage;
        self
    }

    /// Set the free-list policy.
    pub fn with_free_list(mut self, free_list: FreeListPolicy) -> Self {
        self.free_list = free_list;
        self
    }

    /// Turn lookup validation on or off.
    pub fn with_validation(mut self, validation: bool) -> Self {
        self.validation = validation;
        self
    }

    /// Set the proxy recycling queue capacity.
    pub fn with_proxy_cache(mut self, proxy_cache: usize) -> Self {
        self.proxy_cache = proxy_cache;
        self
    }

    /// Check the configuration for inconsistencies.
    pub fn validate(&self) -> Result<(), PoolError> {
        if let StorageKind::MultiArray { elements_per_array } = self.storage {
            if elements_per_array == 0 {
                return Err(PoolError::InvalidConfig {
                    reason: "elements_per_array must be > 0".into(),
                });
            }
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new()
    }
}
