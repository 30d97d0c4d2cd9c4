//! Storage-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during storage and element-pool operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// The backend cannot represent the requested number of elements.
    ///
    /// Not recoverable by retrying: choose a backend kind with a larger
    /// maximum (e.g. multi-array) up front.
    CapacityExceeded {
        /// Number of elements requested.
        requested: u64,
        /// Largest element count this backend can hold.
        max: u64,
    },
    /// An index was freed that is not currently allocated.
    NotLive {
        /// The offending index.
        index: u64,
    },
    /// An index at or past the high-water mark was addressed.
    IndexOutOfRange {
        /// The offending index.
        index: u64,
        /// Current high-water mark.
        size: u64,
    },
    /// The operating system refused to provide a mapped region.
    MapFailed {
        /// Description from the OS error.
        reason: String,
    },
    /// Construction parameters are inconsistent.
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { requested, max } => {
                write!(
                    f,
                    "storage capacity exceeded: requested {requested} elements, maximum {max}"
                )
            }
            Self::NotLive { index } => write!(f, "element {index} is not allocated"),
            Self::IndexOutOfRange { index, size } => {
                write!(f, "element {index} out of range (high-water mark {size})")
            }
            Self::MapFailed { reason } => write!(f, "anonymous mapping failed: {reason}"),
            Self::InvalidConfig { reason } => write!(f, "invalid storage config: {reason}"),
        }
    }
}

impl Error for StorageError {}
