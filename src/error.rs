//! Error types for table construction and insertion.

use thiserror::Error;

/// Caller-side precondition violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// Keys must contain at least one byte.
    #[error("key must not be empty")]
    EmptyKey,
    /// Key exceeds the configured maximum length.
    #[error("key is {len} bytes, limit is {max}")]
    KeyTooLong {
        /// Length of the rejected key in bytes.
        len: usize,
        /// Configured limit.
        max: usize,
    },
    /// Tables need at least one slot or bucket.
    #[error("capacity must be greater than zero")]
    ZeroCapacity,
}

/// Failure of a table operation. A failed insert leaves the table unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// Memory for a slot array or key copy could not be obtained, or the
    /// requested capacity does not fit in `usize`.
    #[error("allocation failed while reserving capacity {capacity}")]
    AllocationFailure {
        /// Slot count (or key length) that was being reserved.
        capacity: usize,
    },
    /// The caller passed an argument that violates a precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),
}

impl TableError {
    pub(crate) fn alloc(capacity: usize) -> Self {
        tracing::warn!(capacity, "allocation failure surfaced to caller");
        TableError::AllocationFailure { capacity }
    }
}
