//! Pool-level error types.

use std::error::Error;
use std::fmt;

use stride_core::{LayoutError, PoolId};
use stride_storage::StorageError;

use crate::proxy::Proxy;

/// Errors returned by [`Pool`](crate::Pool) operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// The id is past the high-water mark or on the free list.
    NoSuchElement {
        /// The requested record id.
        id: u64,
    },
    /// A proxy was handed to a pool that did not create it.
    ForeignProxy {
        /// Pool the proxy belongs to.
        proxy_owner: PoolId,
        /// Pool it was handed to.
        pool: PoolId,
    },
    /// The pool was structurally modified while a cursor was walking it.
    ConcurrentModification {
        /// Structural version the cursor was created at.
        expected: u64,
        /// Structural version found on the next step.
        found: u64,
    },
    /// Construction parameters are inconsistent.
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
    /// A layout field could not be resolved.
    Layout(LayoutError),
    /// The storage layer failed.
    Storage(StorageError),
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchElement { id } => write!(f, "no such element: {id}"),
            Self::ForeignProxy { proxy_owner, pool } => {
                write!(f, "proxy belongs to {proxy_owner}, not {pool}")
            }
            Self::ConcurrentModification { expected, found } => write!(
                f,
                "pool modified during iteration (version {expected} -> {found})"
            ),
            Self::InvalidConfig { reason } => write!(f, "invalid pool config: {reason}"),
            Self::Layout(e) => write!(f, "layout error: {e}"),
            Self::Storage(e) => write!(f, "storage error: {e}"),
        }
    }
}

impl Error for PoolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Layout(e) => Some(e),
            Self::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StorageError> for PoolError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<LayoutError> for PoolError {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

/// A proxy refused by [`Pool::release_ref`](crate::Pool::release_ref).
///
/// Carries the proxy back to the caller so it can be returned to the pool
/// that owns it.
#[derive(Debug)]
pub struct RejectedProxy {
    proxy: Proxy,
    error: PoolError,
}

impl RejectedProxy {
    pub(crate) fn new(proxy: Proxy, error: PoolError) -> Self {
        Self { proxy, error }
    }

    /// Why the proxy was refused.
    pub fn error(&self) -> &PoolError {
        &self.error
    }

    /// Take the proxy back.
    pub fn into_proxy(self) -> Proxy {
        self.proxy
    }
}

impl fmt::Display for RejectedProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "proxy release rejected: {}", self.error)
    }
}

impl Error for RejectedProxy {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}
