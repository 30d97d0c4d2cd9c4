//! Runtime-selected backend.
//!
//! Pools configured from a [`StorageKind`] store their records in a
//! [`DynStorage`], which forwards every operation to the chosen backend.

use crate::config::StorageKind;
use crate::error::StorageError;
use crate::heap::HeapStorage;
use crate::mapped::MappedStorage;
use crate::multi::MultiArrayStorage;
use crate::storage::Storage;

/// One of the built-in backends, chosen at construction.
#[derive(Debug)]
pub enum DynStorage {
    /// Single heap array.
    Heap(HeapStorage),
    /// Single anonymous mapping.
    Mapped(MappedStorage),
    /// Chained heap arrays.
    MultiArray(MultiArrayStorage<HeapStorage>),
}

impl DynStorage {
    /// Allocate `len` zeroed elements in the backend named by `kind`.
    pub fn from_kind(kind: &StorageKind, element_size: usize, len: u64) -> Result<Self, StorageError> {
        Ok(match kind {
            StorageKind::Heap => Self::Heap(HeapStorage::new(element_size, len)?),
            StorageKind::Mapped => Self::Mapped(MappedStorage::new(element_size, len)?),
            StorageKind::MultiArray { elements_per_array } => Self::MultiArray(
                MultiArrayStorage::new(element_size, *elements_per_array, len)?,
            ),
        })
    }

    /// Which kind of backend this is.
    pub fn kind(&self) -> StorageKind {
        match self {
            Self::Heap(_) => StorageKind::Heap,
            Self::Mapped(_) => StorageKind::Mapped,
            Self::MultiArray(m) => StorageKind::MultiArray {
                elements_per_array: m.stride(),
            },
        }
    }
}

macro_rules! forward {
    ($self:ident, $s:ident => $body:expr) => {
        match $self {
            DynStorage::Heap($s) => $body,
            DynStorage::Mapped($s) => $body,
            DynStorage::MultiArray($s) => $body,
        }
    };
}

impl Storage for DynStorage {
    fn element_size(&self) -> usize {
        forward!(self, s => s.element_size())
    }

    fn len(&self) -> u64 {
        forward!(self, s => s.len())
    }

    fn max_len(&self) -> u64 {
        forward!(self, s => s.max_len())
    }

    fn resize(&mut self, new_len: u64) -> Result<(), StorageError> {
        forward!(self, s => s.resize(new_len))
    }

    fn element(&self, index: u64) -> &[u8] {
        forward!(self, s => s.element(index))
    }

    fn element_mut(&mut self, index: u64) -> &mut [u8] {
        forward!(self, s => s.element_mut(index))
    }

    fn memory_bytes(&self) -> usize {
        forward!(self, s => s.memory_bytes())
    }

    fn copy_element(&mut self, src: u64, dst: u64) {
        forward!(self, s => s.copy_element(src, dst))
    }

    fn swap_elements(&mut self, a: u64, b: u64) {
        forward!(self, s => s.swap_elements(a, b))
    }
}
