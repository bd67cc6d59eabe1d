//! chain-hashmap: a hash map that threads every entry through one shared
//! list and indexes into that list with per-bucket heads, plus a
//! string-keyed dictionary layer with text loading and fuzzy name lookup.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: deterministic name-to-object lookup for registries (instruction
//!   sets, trait tables, configuration dictionaries) whose iteration order
//!   must be reproducible run to run, checkpoint to checkpoint.
//! - Layers:
//!   - hash::BucketKey: per-key-type bucket functions (integer, opaque
//!     handle, text). Pure, stateless, deliberately simple — the text hash's
//!     anagram collisions are a documented, load-bearing property.
//!   - ChainHashMap<K, V>: the engine. One doubly linked list of all
//!     entries, threaded through a slotmap arena; a bucket index of arena
//!     keys pointing at the first entry of each bucket's contiguous run.
//!     Lookups scan only their run; duplicates are legal via `add`;
//!     `set_value` is the upsert.
//!   - Dictionary<V>: ChainHashMap<String, V> plus `load` (parse
//!     `key=value` text) and `near_match` (Levenshtein fuzzy lookup).
//!   - SharedRegistry<V>: a Dictionary behind a mutex with lock-per-accessor
//!     scope, for the one place a table is shared across threads.
//!
//! Constraints
//! - Single-threaded core: no internal locking; traversal cursors are local
//!   to each call, never instance state.
//! - Arena storage: bucket heads and list links are slotmap keys, not
//!   pointers; no unsafe anywhere.
//! - Deterministic layout: store order (and therefore iteration order,
//!   `near_match` tie-breaking, and the checkpoint form) is a function of
//!   the operation history alone.
//! - Resizing drains the old store tail-first and reinserts with the `add`
//!   policy, so a resize reverses prior store order. Kept and tested;
//!   consumers were written against it.
//!
//! Why this split?
//! - Localize invariants: contiguity and index correctness live entirely in
//!   `ChainHashMap`; the dictionary and registry add no structural state.
//! - Clear failure boundaries: absence is `Option`/`bool`/empty-string;
//!   `TableError` covers removal of a missing key, zero table sizes, and
//!   unparsable load lines; invariant breakage (programmer error) panics in
//!   `validate()` with a full state dump.
//!
//! Notes and non-goals
//! - Keys need `BucketKey + Eq`; values need nothing (cloning, ordering,
//!   and parsing are required only by the operations that use them).
//! - `find` returns the first match in bucket order — duplicates hide
//!   behind it until removals re-expose them.
//! - No small-table optimization, no tombstones, no incremental rehash:
//!   registries here hold hundreds of entries, not millions.
//! - Checkpointing (feature `serde`) persists store order and bucket layout
//!   verbatim; a restored table iterates identically.

mod chain_hash_map;
mod chain_hash_map_proptest;
mod dictionary;
mod error;
pub mod hash;
#[cfg(feature = "serde")]
mod persist;
mod registry;

// Public surface
pub use chain_hash_map::{
    ChainHashMap, Iter, Keys, Values, TABLE_SIZE_DEFAULT, TABLE_SIZE_LARGE, TABLE_SIZE_MEDIUM,
};
pub use dictionary::Dictionary;
pub use error::TableError;
pub use hash::{BucketKey, OpaqueHandle};
pub use registry::SharedRegistry;
