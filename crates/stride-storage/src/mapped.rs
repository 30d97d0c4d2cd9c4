//! Anonymous memory-mapped backend.
//!
//! [`MappedStorage`] keeps its elements in an anonymous `mmap` region
//! outside the allocator's heap. Pages are zero-filled by the OS and only
//! committed on first touch, which suits large, sparsely written pools.
//! Growth maps a fresh, larger region and copies the old contents across.

use memmap2::MmapMut;

use crate::error::StorageError;
use crate::storage::{NewStorage, Storage};

/// Fixed-size elements in one anonymous memory map.
pub struct MappedStorage {
    /// `None` while no element is addressable (zero-length maps are invalid).
    map: Option<MmapMut>,
    element_size: usize,
    len: u64,
    max_bytes: usize,
}

impl MappedStorage {
    /// Default byte limit for one region: `i32::MAX`, matching heap arrays.
    pub const DEFAULT_MAX_BYTES: usize = i32::MAX as usize;

    /// Map `len` zeroed elements of `element_size` bytes.
    pub fn new(element_size: usize, len: u64) -> Result<Self, StorageError> {
        Self::with_max_bytes(element_size, len, Self::DEFAULT_MAX_BYTES)
    }

    /// Like [`MappedStorage::new`] but with an explicit region byte limit.
    pub fn with_max_bytes(
        element_size: usize,
        len: u64,
        max_bytes: usize,
    ) -> Result<Self, StorageError> {
        if element_size == 0 {
            return Err(StorageError::InvalidConfig {
                reason: "element_size must be > 0".into(),
            });
        }
        let mut storage = Self {
            map: None,
            element_size,
            len: 0,
            max_bytes,
        };
        storage.resize(len)?;
        Ok(storage)
    }

    fn byte_range(&self, index: u64) -> std::ops::Range<usize> {
        assert!(
            index < self.len,
            "element {index} out of bounds (len {})",
            self.len
        );
        let start = index as usize * self.element_size;
        start..start + self.element_size
    }

    fn bytes(&self) -> &[u8] {
        self.map.as_deref().unwrap_or(&[])
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        match self.map.as_mut() {
            Some(map) => &mut map[..],
            None => &mut [],
        }
    }
}

impl Storage for MappedStorage {
    fn element_size(&self) -> usize {
        self.element_size
    }

    fn len(&self) -> u64 {
        self.len
    }

    fn max_len(&self) -> u64 {
        (self.max_bytes / self.element_size) as u64
    }

    fn resize(&mut self, new_len: u64) -> Result<(), StorageError> {
        if new_len <= self.len {
            return Ok(());
        }
        if new_len > self.max_len() {
            return Err(StorageError::CapacityExceeded {
                requested: new_len,
                max: self.max_len(),
            });
        }
        let new_bytes = new_len as usize * self.element_size;
        let mut map = MmapMut::map_anon(new_bytes).map_err(|e| StorageError::MapFailed {
            reason: e.to_string(),
        })?;
        let old = self.bytes();
        map[..old.len()].copy_from_slice(old);
        self.map = Some(map);
        self.len = new_len;
        Ok(())
    }

    fn element(&self, index: u64) -> &[u8] {
        let range = self.byte_range(index);
        &self.bytes()[range]
    }

    fn element_mut(&mut self, index: u64) -> &mut [u8] {
        let range = self.byte_range(index);
        &mut self.bytes_mut()[range]
    }

    fn memory_bytes(&self) -> usize {
        self.bytes().len()
    }
}

impl NewStorage for MappedStorage {
    fn allocate(element_size: usize, len: u64) -> Result<Self, StorageError> {
        Self::new(element_size, len)
    }
}

impl std::fmt::Debug for MappedStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MappedStorage")
            .field("element_size", &self.element_size)
            .field("len", &self.len)
            .field("max_bytes", &self.max_bytes)
            .finish()
    }
}
