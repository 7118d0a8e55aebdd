//! Construction parameters for [`StrTable`](crate::StrTable).

use crate::error::{ArgumentError, TableError};

/// Slot count used by [`TableConfig::default`].
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;
/// Longest key accepted by [`TableConfig::default`], in bytes.
pub const DEFAULT_MAX_KEY_LEN: usize = 64;

/// Builder-style configuration for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    initial_capacity: usize,
    max_key_len: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_key_len: DEFAULT_MAX_KEY_LEN,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested starting slot count. Rounded up to a power of two when the
    /// table is built.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Longest key, in bytes, that inserts will accept.
    pub fn with_max_key_len(mut self, len: usize) -> Self {
        self.max_key_len = len;
        self
    }

    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    pub fn max_key_len(&self) -> usize {
        self.max_key_len
    }

    /// Slot count the table will actually allocate: the requested capacity
    /// rounded up to the next power of two.
    pub(crate) fn slot_count(&self) -> Result<usize, TableError> {
        if self.initial_capacity == 0 {
            return Err(ArgumentError::ZeroCapacity.into());
        }
        self.initial_capacity
            .checked_next_power_of_two()
            .ok_or_else(|| TableError::alloc(self.initial_capacity))
    }

    pub(crate) fn check_key(&self, key: &str) -> Result<(), ArgumentError> {
        if key.is_empty() {
            return Err(ArgumentError::EmptyKey);
        }
        if key.len() > self.max_key_len {
            return Err(ArgumentError::KeyTooLong {
                len: key.len(),
                max: self.max_key_len,
            });
        }
        Ok(())
    }
}
