//! Flyweight record pools for stride.
//!
//! A [`Pool`] stores millions of fixed-layout records without a heap object
//! per record. Callers hold reusable [`Proxy`] handles, repoint them at a
//! record id, and read or write fields through typed accessors built once
//! per field from the record's [`Layout`](stride_core::Layout).
//!
//! # Architecture
//!
//! ```text
//! Pool<S: Storage>
//! ├── ElementPool<S>        (stride-storage: ids, free list, backend growth)
//! ├── listeners             (ChangeListener, LifecycleListener; one list each)
//! ├── initializer           (quiet setup of every new record)
//! └── recycling queue       (crossbeam bounded channel of spare proxies)
//!
//! Attribute<P> / ArrayAttribute<P> / PointAttribute
//! └── RecordStore           (pool seam: record bytes + notify_before/after)
//! ```
//!
//! # Writes
//!
//! - **Quiet:** `set_quiet` writes bytes and nothing else.
//! - **Notifying:** `set` fires one `before_change`/`after_change` pair.
//!   Composite operations (`PointAttribute::move_by`, `set_all`) fire one
//!   pair per logical change.
//!
//! # Lookup validation
//!
//! [`Pool::get_object`] checks liveness only when validation is on (the
//! default in debug builds). [`Pool::get_object_if_exists`] always checks.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod attribute;
pub mod config;
pub mod error;
pub mod idmap;
pub mod intern;
pub mod iter;
pub mod listener;
pub mod point;
pub mod pool;
pub mod proxy;
pub mod stats;
pub mod traits;

// Public re-exports for the primary API surface.
pub use attribute::{ArrayAttribute, Attribute};
pub use config::PoolConfig;
pub use error::{PoolError, RejectedProxy};
pub use idmap::SequentialIds;
pub use intern::CanonicalIds;
pub use iter::{LiveCursor, LiveIds};
pub use listener::{ChangeListener, LifecycleListener};
pub use point::{Coords, PointAttribute};
pub use pool::{BigPool, Initializer, Pool};
pub use proxy::Proxy;
pub use stats::PoolStats;
pub use traits::RecordStore;
