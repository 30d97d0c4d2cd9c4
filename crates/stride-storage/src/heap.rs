//! Single contiguous heap array backend.
//!
//! [`HeapStorage`] keeps every element in one `Vec<u8>`, so element `i`
//! lives at byte `i * element_size`. A single array has an upper bound on
//! its size (`max_bytes`, by default the classic 2 GiB array limit);
//! collections beyond that belong in
//! [`MultiArrayStorage`](crate::MultiArrayStorage).

use crate::error::StorageError;
use crate::storage::{NewStorage, Storage};

/// One `Vec<u8>` holding `len` fixed-size elements.
#[derive(Clone, Debug)]
pub struct HeapStorage {
    data: Vec<u8>,
    element_size: usize,
    len: u64,
    max_bytes: usize,
}

impl HeapStorage {
    /// Default byte limit for one array: `i32::MAX`.
    pub const DEFAULT_MAX_BYTES: usize = i32::MAX as usize;

    /// Allocate `len` zeroed elements of `element_size` bytes.
    pub fn new(element_size: usize, len: u64) -> Result<Self, StorageError> {
        Self::with_max_bytes(element_size, len, Self::DEFAULT_MAX_BYTES)
    }

    /// Like [`HeapStorage::new`] but with an explicit single-array byte limit.
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
            data: Vec::new(),
            element_size,
            len: 0,
            max_bytes,
        };
        storage.resize(len)?;
        Ok(storage)
    }

    /// The raw backing bytes of the first `len` elements.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
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
}

impl Storage for HeapStorage {
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
        // new_len <= max_len, so the byte count fits in max_bytes.
        self.data.resize(new_len as usize * self.element_size, 0);
        self.len = new_len;
        Ok(())
    }

    fn element(&self, index: u64) -> &[u8] {
        let range = self.byte_range(index);
        &self.data[range]
    }

    fn element_mut(&mut self, index: u64) -> &mut [u8] {
        let range = self.byte_range(index);
        &mut self.data[range]
    }

    fn memory_bytes(&self) -> usize {
        self.data.capacity()
    }

    fn swap_elements(&mut self, a: u64, b: u64) {
        if a == b {
            return;
        }
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let lo_range = self.byte_range(lo);
        let hi_range = self.byte_range(hi);
        let (head, tail) = self.data.split_at_mut(hi_range.start);
        head[lo_range].swap_with_slice(&mut tail[..self.element_size]);
    }
}

impl NewStorage for HeapStorage {
    fn allocate(element_size: usize, len: u64) -> Result<Self, StorageError> {
        Self::new(element_size, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_storage_is_zeroed() {
        let storage = HeapStorage::new(12, 5).unwrap();
        assert_eq!(storage.len(), 5);
        assert!(storage.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(storage.as_bytes().len(), 60);
    }

    #[test]
    fn zero_element_size_rejected() {
        assert!(matches!(
            HeapStorage::new(0, 1),
            Err(StorageError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn resize_preserves_content() {
        let mut storage = HeapStorage::new(8, 2).unwrap();
        storage.write::<f64>(0, 0, 3.25);
        storage.write::<f64>(1, 0, -1.0);
        storage.resize(100).unwrap();
        assert_eq!(storage.len(), 100);
        assert_eq!(storage.read::<f64>(0, 0), 3.25);
        assert_eq!(storage.read::<f64>(1, 0), -1.0);
        assert_eq!(storage.read::<f64>(99, 0), 0.0);
    }

    #[test]
    fn resize_never_shrinks() {
        let mut storage = HeapStorage::new(4, 10).unwrap();
        storage.resize(3).unwrap();
        assert_eq!(storage.len(), 10);
    }

    #[test]
    fn max_len_follows_byte_limit() {
        let storage = HeapStorage::with_max_bytes(10, 0, 95).unwrap();
        assert_eq!(storage.max_len(), 9);
    }

    #[test]
    fn resize_past_max_is_capacity_error() {
        let mut storage = HeapStorage::with_max_bytes(4, 2, 16).unwrap();
        assert!(storage.resize(4).is_ok());
        assert_eq!(
            storage.resize(5),
            Err(StorageError::CapacityExceeded {
                requested: 5,
                max: 4
            })
        );
        assert_eq!(storage.len(), 4);
    }

    #[test]
    fn swap_elements_in_either_order() {
        let mut storage = HeapStorage::new(4, 4).unwrap();
        storage.write::<u32>(1, 0, 11);
        storage.write::<u32>(3, 0, 33);
        storage.swap_elements(3, 1);
        assert_eq!(storage.read::<u32>(1, 0), 33);
        assert_eq!(storage.read::<u32>(3, 0), 11);
        storage.swap_elements(1, 3);
        assert_eq!(storage.read::<u32>(1, 0), 11);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn element_past_len_panics() {
        let storage = HeapStorage::new(4, 2).unwrap();
        let _ = storage.element(2);
    }
}
