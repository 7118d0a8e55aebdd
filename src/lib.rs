//! strtable: a resizable open-addressing hash table keyed by short owned
//! strings, plus a fixed-bucket chained multimap built on the same hash.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small associative table for parse-then-evaluate workloads.
//!   A parser fills the table once and an evaluator then does many point
//!   lookups by key.
//! - Layers:
//!   - `hash`: djb2 over bytes, 32-bit, seeded at 5381. Every structure in
//!     the crate hashes with it.
//!   - `StrTable<V>`: open addressing with linear probing over a
//!     power-of-two slot array, indexed by masking. Doubles and rehashes
//!     before an insert that would push the load factor above one half.
//!   - `ChainedMultimap<V>`: fixed bucket count, separate chaining, modulo
//!     indexing, duplicate keys allowed. Never resizes.
//!
//! Constraints
//! - Single-threaded; operations take `&self`/`&mut self` and run to
//!   completion. The borrow checker rules out reentrant mutation.
//! - No deletion. Entries live until the table is dropped.
//! - Keys are strings (bytes for the multimap). No generic key types.
//! - Iteration order is unspecified.
//!
//! Ownership
//! - The table owns one heap copy of each distinct key, made on first
//!   insertion. Rehash moves these copies; it never reallocates them.
//! - Values are stored as given. Choosing `V = &T` keeps value ownership
//!   entirely with the caller.
//!
//! Failure semantics
//! - All slot arrays and key copies are reserved with `try_reserve_exact`;
//!   exhaustion surfaces as `TableError::AllocationFailure`.
//! - An insert reserves everything it needs before it moves anything, so a
//!   failed insert leaves the table exactly as it was.
//! - Empty or over-long keys and zero capacities are reported as
//!   `TableError::InvalidArgument`, distinct from allocation failure.
//! - Absence on lookup is `None`, not an error.
//!
//! Logging
//! - `tracing` events: `debug` on creation and growth, `trace` per new key,
//!   `warn` when an allocation failure is returned. The crate installs no
//!   subscriber.

mod chained_multimap;
pub mod config;
pub mod error;
pub mod hash;
mod str_table;
mod str_table_proptest;

// Public surface
pub use chained_multimap::ChainedMultimap;
pub use config::TableConfig;
pub use error::{ArgumentError, TableError};
pub use str_table::{Iter, StrTable};
