//! Error type shared by the table, dictionary, and registry layers.

use thiserror::Error;

/// Failures reported by table and dictionary operations.
///
/// Absence of a key in `find`/`has_entry`/`near_match` is a normal outcome
/// and never surfaces as an error; only `remove` treats a missing key as a
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// `remove` was asked for a key with no entry in the table.
    #[error("key not found")]
    KeyNotFound,

    /// A table size of zero was requested; a table needs at least one bucket.
    #[error("invalid table size {0}: the bucket count must be positive")]
    InvalidTableSize(usize),

    /// `load` could not convert a value's text into the dictionary's value
    /// type.
    #[error("cannot parse value for key `{key}`: {reason}")]
    Parse { key: String, reason: String },
}
