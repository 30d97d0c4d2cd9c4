//! Core types and traits for the stride record pools.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the stride workspace:
//! identifiers, primitive kinds, record layouts, access traits and
//! layout errors.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod access;
pub mod error;
pub mod id;
pub mod layout;
pub mod primitive;

pub use access::{ReadAccess, RecordMut, RecordView, WriteAccess};
pub use error::LayoutError;
pub use id::{ListenerId, PoolId};
pub use layout::{ArrayField, FieldDef, Layout, LayoutBuilder, ScalarField};
pub use primitive::{Primitive, PrimitiveKind};
