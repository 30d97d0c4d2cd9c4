//! Multi-array backend chaining several sub-arrays of identical stride.
//!
//! A single array is bounded by its backend's `max_len`. [`MultiArrayStorage`]
//! lifts that bound by routing element `i` to sub-array `i / stride` at
//! local index `i % stride`. Every sub-array except the last holds exactly
//! `stride` elements, so the translation is pure arithmetic.
//!
//! ```text
//! index:    0 .. stride-1 | stride .. 2*stride-1 | 2*stride ..
//! array:    arrays[0]     | arrays[1]            | arrays[2] (partial)
//! ```

use crate::error::StorageError;
use crate::heap::HeapStorage;
use crate::storage::{NewStorage, Storage};

/// Chained sub-arrays of `stride` elements each.
#[derive(Clone, Debug)]
pub struct MultiArrayStorage<S: NewStorage = HeapStorage> {
    arrays: Vec<S>,
    element_size: usize,
    stride: u64,
    max_arrays: u64,
    len: u64,
}

impl<S: NewStorage> MultiArrayStorage<S> {
    /// Default cap on the number of sub-arrays.
    pub const DEFAULT_MAX_ARRAYS: u64 = u32::MAX as u64;

    /// Create storage with `len` zeroed elements split into sub-arrays of
    /// `stride` elements.
    pub fn new(element_size: usize, stride: u64, len: u64) -> Result<Self, StorageError> {
        Self::with_max_arrays(element_size, stride, len, Self::DEFAULT_MAX_ARRAYS)
    }

    /// Like [`MultiArrayStorage::new`] with an explicit sub-array cap.
    pub fn with_max_arrays(
        element_size: usize,
        stride: u64,
        len: u64,
        max_arrays: u64,
    ) -> Result<Self, StorageError> {
        if element_size == 0 {
            return Err(StorageError::InvalidConfig {
                reason: "element_size must be > 0".into(),
            });
        }
        if stride == 0 {
            return Err(StorageError::InvalidConfig {
                reason: "elements_per_array must be > 0".into(),
            });
        }
        if max_arrays == 0 {
            return Err(StorageError::InvalidConfig {
                reason: "max_arrays must be > 0".into(),
            });
        }
        // Probe one sub-array so a stride the backend cannot hold fails now
        // rather than on the first growth past it.
        let probe = S::allocate(element_size, 0)?;
        if stride > probe.max_len() {
            return Err(StorageError::InvalidConfig {
                reason: format!(
                    "elements_per_array ({stride}) exceeds one sub-array's maximum ({})",
                    probe.max_len()
                ),
            });
        }
        let mut storage = Self {
            arrays: Vec::new(),
            element_size,
            stride,
            max_arrays,
            len: 0,
        };
        storage.resize(len)?;
        Ok(storage)
    }

    /// Elements per sub-array.
    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Number of sub-arrays currently allocated.
    pub fn array_count(&self) -> usize {
        self.arrays.len()
    }

    /// Translate a global index to `(sub-array, local index)`.
    #[inline]
    pub fn locate(&self, index: u64) -> (usize, u64) {
        ((index / self.stride) as usize, index % self.stride)
    }

    fn check(&self, index: u64) {
        assert!(
            index < self.len,
            "element {index} out of bounds (len {})",
            self.len
        );
    }
}

impl<S: NewStorage> Storage for MultiArrayStorage<S> {
    fn element_size(&self) -> usize {
        self.element_size
    }

    fn len(&self) -> u64 {
        self.len
    }

    fn max_len(&self) -> u64 {
        self.max_arrays.saturating_mul(self.stride)
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
        let needed = new_len.div_ceil(self.stride);
        for a in 0..needed {
            let target = if a + 1 < needed {
                self.stride
            } else {
                new_len - a * self.stride
            };
            match self.arrays.get_mut(a as usize) {
                Some(array) => array.resize(target)?,
                None => self.arrays.push(S::allocate(self.element_size, target)?),
            }
        }
        self.len = new_len;
        Ok(())
    }

    fn element(&self, index: u64) -> &[u8] {
        self.check(index);
        let (array, local) = self.locate(index);
        self.arrays[array].element(local)
    }

    fn element_mut(&mut self, index: u64) -> &mut [u8] {
        self.check(index);
        let (array, local) = self.locate(index);
        self.arrays[array].element_mut(local)
    }

    fn memory_bytes(&self) -> usize {
        self.arrays.iter().map(Storage::memory_bytes).sum()
    }

    fn swap_elements(&mut self, a: u64, b: u64) {
        if a == b {
            return;
        }
        self.check(a);
        self.check(b);
        let (array_a, local_a) = self.locate(a);
        let (array_b, local_b) = self.locate(b);
        if array_a == array_b {
            self.arrays[array_a].swap_elements(local_a, local_b);
            return;
        }
        let (lo, hi, local_lo, local_hi) = if array_a < array_b {
            (array_a, array_b, local_a, local_b)
        } else {
            (array_b, array_a, local_b, local_a)
        };
        let (head, tail) = self.arrays.split_at_mut(hi);
        head[lo]
            .element_mut(local_lo)
            .swap_with_slice(tail[0].element_mut(local_hi));
    }
}
