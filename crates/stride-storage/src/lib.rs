//! Fixed-stride element storage and free-list element pools.
//!
//! Provides growable byte storage addressed by element index, in several
//! interchangeable physical backends, plus the [`ElementPool`] slab that
//! hands out indices, recycles freed ones and grows its backend on demand.
//!
//! # Architecture
//!
//! ```text
//! ElementPool<S: Storage> (allocate / recycle / free / swap / clear)
//! ├── S: Storage
//! │   ├── HeapStorage            (one Vec<u8>)
//! │   ├── MappedStorage          (anonymous memmap2 region)
//! │   ├── MultiArrayStorage<S>   (index / stride → sub-array, index % stride → local)
//! │   └── DynStorage             (runtime choice from StorageKind)
//! ├── free list (Vec<u64> stack)
//! └── LiveSet (bitset, O(1) liveness)
//! ```
//!
//! Records are never zeroed on allocation or free; a recycled index keeps
//! whatever bytes its previous occupant left behind.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod dynamic;
pub mod element_pool;
pub mod error;
pub mod heap;
pub mod live;
pub mod mapped;
pub mod multi;
pub mod storage;

// Public re-exports for the primary API surface.
pub use config::{FreeListPolicy, StorageKind};
pub use dynamic::DynStorage;
pub use element_pool::ElementPool;
pub use error::StorageError;
pub use heap::HeapStorage;
pub use live::LiveSet;
pub use mapped::MappedStorage;
pub use multi::MultiArrayStorage;
pub use storage::{Access, AccessMut, NewStorage, Storage};
