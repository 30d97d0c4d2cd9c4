//! Backend selection and free-list policy.

/// Which physical backend an element pool stores its records in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StorageKind {
    /// One contiguous heap array ([`HeapStorage`](crate::HeapStorage)).
    #[default]
    Heap,
    /// One anonymous memory map ([`MappedStorage`](crate::MappedStorage)).
    Mapped,
    /// Several heap arrays of identical stride
    /// ([`MultiArrayStorage`](crate::MultiArrayStorage)), for collections
    /// larger than a single array may hold.
    MultiArray {
        /// Elements per sub-array. Must be non-zero.
        elements_per_array: u64,
    },
}

impl StorageKind {
    /// Default sub-array stride for multi-array storage: 1M elements.
    pub const DEFAULT_ELEMENTS_PER_ARRAY: u64 = 1 << 20;

    /// Multi-array storage with the default stride.
    pub fn multi_array() -> Self {
        Self::MultiArray {
            elements_per_array: Self::DEFAULT_ELEMENTS_PER_ARRAY,
        }
    }
}

/// How [`ElementPool::create`](crate::ElementPool::create) picks an index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FreeListPolicy {
    /// Pop the most recently freed index before appending.
    #[default]
    Reuse,
    /// Always append; freed indices are tracked but never handed out again
    /// until [`ElementPool::clear`](crate::ElementPool::clear).
    AppendOnly,
}
