//! Stride: compact pools of fixed-layout records.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! stride sub-crates. For most users, adding `stride` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use stride::prelude::*;
//!
//! // Declare the record: a 2-D position and a hit counter.
//! let mut b = LayoutBuilder::new();
//! let pos = PointAttribute::new(b.array::<f64>("pos", 2));
//! let hits = Attribute::new(b.scalar::<u32>("hits"));
//! let layout = b.build().unwrap();
//!
//! let mut pool = Pool::new(layout).unwrap();
//! let mut p = pool.create_ref();
//! for i in 0..3 {
//!     pool.create(&mut p).unwrap();
//!     pos.set_position(&mut pool, &p, &[i as f64, 0.0]);
//! }
//!
//! // Deleted slots are reused; surviving ids never move.
//! pool.delete_id(1).unwrap();
//! pool.create(&mut p).unwrap();
//! assert_eq!(pool.get_id(&p), 1);
//!
//! // Retarget the same proxy at each live record in turn.
//! let mut cursor = pool.cursor();
//! while cursor.advance(&pool, &mut p).unwrap().is_some() {
//!     let n = hits.get(&pool, &p);
//!     hits.set(&mut pool, &p, n + 1);
//! }
//! assert_eq!(pool.len(), 3);
//! pool.release_ref(p).unwrap();
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `stride-core` | Layouts, primitives, record views, ids |
//! | [`storage`] | `stride-storage` | Storage backends and the element pool |
//! | [`pool`] | `stride-pool` | Pools, proxies, accessors, listeners, id maps |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Record layouts, primitive kinds and raw record views (`stride-core`).
///
/// Contains [`types::LayoutBuilder`], [`types::Layout`], the
/// [`types::Primitive`] trait and the [`types::RecordView`] /
/// [`types::RecordMut`] views handed to listeners and initializers.
pub use stride_core as types;

/// Storage backends and the element pool (`stride-storage`).
///
/// [`storage::HeapStorage`], [`storage::MappedStorage`] and
/// [`storage::MultiArrayStorage`] implement [`storage::Storage`];
/// [`storage::ElementPool`] adds liveness and free-slot reuse on top.
pub use stride_storage as storage;

/// Pools, proxies and attribute accessors (`stride-pool`).
///
/// [`pool::Pool`] is the main entry point. [`pool::SequentialIds`] and
/// [`pool::CanonicalIds`] build id maps on top of it.
pub use stride_pool as pool;

/// Common imports for typical stride usage.
///
/// ```rust
/// use stride::prelude::*;
/// ```
pub mod prelude {
    // Layouts
    pub use stride_core::{Layout, LayoutBuilder, PrimitiveKind, RecordMut, RecordView};

    // Storage selection
    pub use stride_storage::{FreeListPolicy, StorageKind};

    // Pools and proxies
    pub use stride_pool::{BigPool, Pool, PoolConfig, PoolStats, Proxy, RecordStore};

    // Accessors
    pub use stride_pool::{ArrayAttribute, Attribute, PointAttribute};

    // Listeners
    pub use stride_pool::{ChangeListener, LifecycleListener};

    // Errors
    pub use stride_core::LayoutError;
    pub use stride_pool::PoolError;
    pub use stride_storage::StorageError;
}
