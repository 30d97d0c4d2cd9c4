//! The [`Storage`] backend trait and its repointable access cursors.
//!
//! A storage backend is a growable array of fixed-size elements. Every
//! element is `element_size()` bytes and is addressed by a `u64` index;
//! primitives inside an element are addressed by byte offset.

use smallvec::SmallVec;
use stride_core::{Primitive, ReadAccess, WriteAccess};

use crate::error::StorageError;

/// Scratch buffer for element copies; records up to 64 bytes stay inline.
pub(crate) type ElementBuf = SmallVec<[u8; 64]>;

/// Growable fixed-stride byte storage.
///
/// `len()` is the number of addressable elements (the backend's capacity);
/// which of them hold live records is the element pool's business.
pub trait Storage {
    /// Size of one element in bytes.
    fn element_size(&self) -> usize;

    /// Number of addressable elements.
    fn len(&self) -> u64;

    /// Whether no element is addressable.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest element count one instance of this backend can hold.
    fn max_len(&self) -> u64;

    /// Grow to `new_len` elements, preserving existing content.
    ///
    /// Requests at or below the current length are no-ops: storage never
    /// shrinks implicitly. New elements are zero-filled.
    fn resize(&mut self, new_len: u64) -> Result<(), StorageError>;

    /// Bytes of element `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    fn element(&self, index: u64) -> &[u8];

    /// Mutable bytes of element `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    fn element_mut(&mut self, index: u64) -> &mut [u8];

    /// Memory held by the backing allocation(s) in bytes.
    fn memory_bytes(&self) -> usize;

    /// Decode a primitive at `offset` within element `index`.
    #[inline]
    fn read<P: Primitive>(&self, index: u64, offset: usize) -> P
    where
        Self: Sized,
    {
        P::from_le_slice(&self.element(index)[offset..offset + P::SIZE])
    }

    /// Encode a primitive at `offset` within element `index`.
    #[inline]
    fn write<P: Primitive>(&mut self, index: u64, offset: usize, value: P)
    where
        Self: Sized,
    {
        value.write_le_slice(&mut self.element_mut(index)[offset..offset + P::SIZE]);
    }

    /// Overwrite element `dst` with the bytes of element `src`.
    fn copy_element(&mut self, src: u64, dst: u64) {
        if src == dst {
            return;
        }
        let buf: ElementBuf = SmallVec::from_slice(self.element(src));
        self.element_mut(dst).copy_from_slice(&buf);
    }

    /// Exchange the full byte contents of two elements.
    fn swap_elements(&mut self, a: u64, b: u64) {
        if a == b {
            return;
        }
        let tmp: ElementBuf = SmallVec::from_slice(self.element(a));
        self.copy_element(b, a);
        self.element_mut(b).copy_from_slice(&tmp);
    }

    /// Read cursor positioned at element 0.
    fn access(&self) -> Access<'_, Self>
    where
        Self: Sized,
    {
        Access {
            storage: self,
            index: 0,
        }
    }

    /// Read/write cursor positioned at element 0.
    fn access_mut(&mut self) -> AccessMut<'_, Self>
    where
        Self: Sized,
    {
        AccessMut {
            storage: self,
            index: 0,
        }
    }
}

/// Backends that can be allocated from scratch at a given length.
///
/// Used by [`MultiArrayStorage`](crate::MultiArrayStorage) to add sub-arrays.
pub trait NewStorage: Storage + Sized {
    /// Allocate `len` zeroed elements of `element_size` bytes.
    fn allocate(element_size: usize, len: u64) -> Result<Self, StorageError>;
}

/// Read cursor over a backend, repointable to any element.
pub struct Access<'a, S: Storage> {
    storage: &'a S,
    index: u64,
}

impl<S: Storage> Access<'_, S> {
    /// Repoint the cursor.
    pub fn set_element_index(&mut self, index: u64) {
        self.index = index;
    }

    /// Element the cursor currently addresses.
    pub fn element_index(&self) -> u64 {
        self.index
    }
}

impl<S: Storage> ReadAccess for Access<'_, S> {
    fn record_bytes(&self) -> &[u8] {
        self.storage.element(self.index)
    }
}

/// Read/write cursor over a backend, repointable to any element.
pub struct AccessMut<'a, S: Storage> {
    storage: &'a mut S,
    index: u64,
}

impl<S: Storage> AccessMut<'_, S> {
    /// Repoint the cursor.
    pub fn set_element_index(&mut self, index: u64) {
        self.index = index;
    }

    /// Element the cursor currently addresses.
    pub fn element_index(&self) -> u64 {
        self.index
    }

    /// Copy `len` bytes starting at `offset` from element `src` into the
    /// current element at the same offset.
    pub fn copy_range_from(&mut self, src: u64, offset: usize, len: usize) {
        if src == self.index {
            return;
        }
        let buf: ElementBuf = SmallVec::from_slice(&self.storage.element(src)[offset..offset + len]);
        self.storage.element_mut(self.index)[offset..offset + len].copy_from_slice(&buf);
    }
}

impl<S: Storage> ReadAccess for AccessMut<'_, S> {
    fn record_bytes(&self) -> &[u8] {
        self.storage.element(self.index)
    }
}

impl<S: Storage> WriteAccess for AccessMut<'_, S> {
    fn record_bytes_mut(&mut self) -> &mut [u8] {
        self.storage.element_mut(self.index)
    }
}
