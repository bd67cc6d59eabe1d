//! ChainHashMap: the core engine — a bucket index over one shared entry list.
//!
//! All entries live in a single list, threaded through an arena in "store
//! order". Entries sharing a bucket form one contiguous run of that list,
//! and the bucket index holds, per bucket, the arena key of the run's first
//! entry (or nothing). A lookup therefore scans only its own run: it starts
//! at the bucket head and stops as soon as it meets an entry with a
//! different bucket id.
//!
//! Structural invariants, maintained by every mutation and checked by
//! [`ChainHashMap::validate`]:
//! - contiguity: entries with equal bucket id are adjacent in store order;
//! - index correctness: a bucket slot is empty iff no entry hashes there,
//!   and otherwise names the first entry of the run;
//! - the stored bucket id of every entry equals its hash for the current
//!   table size (recomputed wholesale on resize).

use core::borrow::Borrow;
use core::fmt;

use slotmap::{DefaultKey, SlotMap};

use crate::error::TableError;
use crate::hash::BucketKey;

/// Default bucket count for a freshly constructed table.
pub const TABLE_SIZE_DEFAULT: usize = 23;
/// A medium table, for registries expected to hold a few hundred names.
pub const TABLE_SIZE_MEDIUM: usize = 331;
/// A large table, for registries expected to hold a few thousand names.
pub const TABLE_SIZE_LARGE: usize = 2311;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    bucket: usize,
    value: V,
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

/// Hash map with duplicate-tolerant insertion and deterministic iteration.
///
/// `add` always inserts (duplicate keys are legal); `set_value` is the
/// upsert. Iteration follows store order: within a bucket,
/// most-recently-added first; across buckets, the order runs were opened.
///
/// Single-threaded by design: no internal locking, and traversal state is
/// local to each call, never kept on the instance. Callers needing a shared
/// table wrap it externally (see `SharedRegistry`).
#[derive(Debug)]
pub struct ChainHashMap<K, V> {
    slots: SlotMap<DefaultKey, Entry<K, V>>,
    buckets: Vec<Option<DefaultKey>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<K, V> ChainHashMap<K, V>
where
    K: BucketKey + Eq,
{
    /// Table with [`TABLE_SIZE_DEFAULT`] buckets.
    pub fn new() -> Self {
        Self::with_buckets(TABLE_SIZE_DEFAULT)
    }

    /// Table with `table_size` buckets; fails for a zero size.
    pub fn with_table_size(table_size: usize) -> Result<Self, TableError> {
        if table_size == 0 {
            return Err(TableError::InvalidTableSize(table_size));
        }
        Ok(Self::with_buckets(table_size))
    }

    fn with_buckets(table_size: usize) -> Self {
        Self {
            slots: SlotMap::with_key(),
            buckets: vec![None; table_size],
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current bucket count.
    pub fn table_size(&self) -> usize {
        self.buckets.len()
    }

    /// Inserts a new entry, even if `key` is already present.
    ///
    /// A duplicate lands in front of its bucket's current head, so `find`
    /// sees the most recent insertion; older duplicates become reachable
    /// again as newer ones are removed. An entry opening a fresh bucket is
    /// appended at the end of the store.
    pub fn add(&mut self, key: K, value: V) {
        let bucket = key.bucket(self.buckets.len());
        let id = self.slots.insert(Entry {
            key,
            bucket,
            value,
            prev: None,
            next: None,
        });
        match self.buckets[bucket] {
            Some(old_head) => self.link_before(id, old_head),
            None => self.link_at_tail(id),
        }
        self.buckets[bucket] = Some(id);
    }

    /// Upsert: overwrites the first matching entry in place (position and
    /// bucket id unchanged), or falls back to [`ChainHashMap::add`].
    pub fn set_value(&mut self, key: K, value: V) {
        match self.find_entry(&key) {
            Some(id) => self.slots[id].value = value,
            None => self.add(key, value),
        }
    }

    pub fn has_entry<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + BucketKey + Eq,
    {
        self.find_entry(key).is_some()
    }

    /// Value of the first matching entry in bucket order, if any.
    pub fn find<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + BucketKey + Eq,
    {
        self.find_entry(key).map(|id| &self.slots[id].value)
    }

    pub fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + BucketKey + Eq,
    {
        match self.find_entry(key) {
            Some(id) => Some(&mut self.slots[id].value),
            None => None,
        }
    }

    /// Removes the first matching entry and returns its value, or
    /// [`TableError::KeyNotFound`] if `key` is absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, TableError>
    where
        K: Borrow<Q>,
        Q: ?Sized + BucketKey + Eq,
    {
        let id = self.find_entry(key).ok_or(TableError::KeyNotFound)?;
        let bucket = self.slots[id].bucket;
        if self.buckets[bucket] == Some(id) {
            // The head is leaving; the bucket stays populated only if the
            // next store entry still belongs to it. Contiguity makes this
            // one check sufficient.
            self.buckets[bucket] = match self.slots[id].next {
                Some(next) if self.slots[next].bucket == bucket => Some(next),
                _ => None,
            };
        }
        self.unlink(id);
        let entry = self.slots.remove(id).unwrap();
        Ok(entry.value)
    }

    /// Rebuckets every entry for a new table size; fails (leaving the table
    /// untouched) for a zero size.
    ///
    /// The old store is drained from its tail and each entry re-enters with
    /// the same placement policy as `add`. Entries are therefore processed
    /// in reverse of their prior store order, which can invert bucket-local
    /// order across a resize. Callers depend on that layout staying
    /// reproducible; do not reorder the drain.
    pub fn set_table_size(&mut self, table_size: usize) -> Result<(), TableError> {
        if table_size == 0 {
            return Err(TableError::InvalidTableSize(table_size));
        }
        self.buckets.clear();
        self.buckets.resize(table_size, None);

        let mut drained = Vec::with_capacity(self.slots.len());
        let mut cursor = self.tail;
        while let Some(id) = cursor {
            cursor = self.slots[id].prev;
            drained.push(id);
        }
        self.head = None;
        self.tail = None;

        for id in drained {
            let bucket = self.slots[id].key.bucket(table_size);
            let entry = &mut self.slots[id];
            entry.bucket = bucket;
            entry.prev = None;
            entry.next = None;
            match self.buckets[bucket] {
                Some(old_head) => self.link_before(id, old_head),
                None => self.link_at_tail(id),
            }
            self.buckets[bucket] = Some(id);
        }
        Ok(())
    }

    /// Removes every entry; the table size is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.tail = None;
        for slot in self.buckets.iter_mut() {
            *slot = None;
        }
    }

    /// Entries in store order. The cursor is local to the returned iterator;
    /// nothing is kept on the table.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: &self.slots,
            cursor: self.head,
            remaining: self.slots.len(),
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// Keys and values as parallel vectors, sorted ascending by key.
    ///
    /// Built by scan-and-insert over store order: each entry goes in front
    /// of the first already-placed key that is not smaller, so equal keys
    /// come out in reverse store order. Reports and serialization depend on
    /// this exact ordering.
    pub fn as_lists(&self) -> (Vec<K>, Vec<V>)
    where
        K: Ord + Clone,
        V: Clone,
    {
        let mut keys: Vec<K> = Vec::with_capacity(self.len());
        let mut values: Vec<V> = Vec::with_capacity(self.len());
        for (key, value) in self.iter() {
            let mut pos = 0;
            while pos < keys.len() && *key > keys[pos] {
                pos += 1;
            }
            keys.insert(pos, key.clone());
            values.insert(pos, value.clone());
        }
        (keys, values)
    }

    /// First entry matching `key`: start at the bucket head and scan the
    /// run, stopping at the first entry with a different bucket id. Bounds
    /// the scan to the run length rather than the store length.
    fn find_entry<Q>(&self, key: &Q) -> Option<DefaultKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + BucketKey + Eq,
    {
        let bucket = key.bucket(self.buckets.len());
        let mut cursor = self.buckets[bucket];
        while let Some(id) = cursor {
            let entry = &self.slots[id];
            if entry.bucket != bucket {
                break;
            }
            if entry.key.borrow() == key {
                return Some(id);
            }
            cursor = entry.next;
        }
        None
    }

    /// Links `id` into the list immediately before `anchor`.
    fn link_before(&mut self, id: DefaultKey, anchor: DefaultKey) {
        let anchor_prev = self.slots[anchor].prev;
        {
            let entry = &mut self.slots[id];
            entry.prev = anchor_prev;
            entry.next = Some(anchor);
        }
        self.slots[anchor].prev = Some(id);
        match anchor_prev {
            Some(prev) => self.slots[prev].next = Some(id),
            None => self.head = Some(id),
        }
    }

    /// Links `id` at the end of the list.
    fn link_at_tail(&mut self, id: DefaultKey) {
        let old_tail = self.tail;
        {
            let entry = &mut self.slots[id];
            entry.prev = old_tail;
            entry.next = None;
        }
        match old_tail {
            Some(tail) => self.slots[tail].next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
    }

    /// Unlinks `id` from the list; bucket heads are the caller's problem.
    fn unlink(&mut self, id: DefaultKey) {
        let (prev, next) = {
            let entry = &self.slots[id];
            (entry.prev, entry.next)
        };
        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.tail = prev,
        }
    }

    #[cfg(feature = "serde")]
    pub(crate) fn persist_parts(&self) -> (Vec<(&K, usize, &V)>, Vec<Option<usize>>) {
        let mut entries = Vec::with_capacity(self.slots.len());
        let mut positions = slotmap::SecondaryMap::new();
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let entry = &self.slots[id];
            positions.insert(id, entries.len());
            entries.push((&entry.key, entry.bucket, &entry.value));
            cursor = entry.next;
        }
        let buckets = self
            .buckets
            .iter()
            .map(|head| head.map(|id| positions[id]))
            .collect();
        (entries, buckets)
    }

    /// Rebuilds a table from a persisted snapshot: entries in store order
    /// (with their stored bucket ids) and bucket heads as positions into
    /// that order. Everything is taken verbatim — bucket ids are not
    /// recomputed, the list is relinked exactly as serialized.
    #[cfg(feature = "serde")]
    pub(crate) fn from_persist_parts(
        table_size: usize,
        entries: Vec<(K, usize, V)>,
        bucket_positions: Vec<Option<usize>>,
    ) -> Result<Self, String> {
        if table_size == 0 {
            return Err("table size must be positive".to_string());
        }
        if bucket_positions.len() != table_size {
            return Err(format!(
                "bucket index length {} does not match table size {}",
                bucket_positions.len(),
                table_size
            ));
        }
        let mut table = Self::with_buckets(table_size);
        let mut ids = Vec::with_capacity(entries.len());
        for (key, bucket, value) in entries {
            if bucket >= table_size {
                return Err(format!(
                    "bucket id {bucket} out of range for table size {table_size}"
                ));
            }
            let id = table.slots.insert(Entry {
                key,
                bucket,
                value,
                prev: None,
                next: None,
            });
            table.link_at_tail(id);
            ids.push(id);
        }
        for (slot, position) in table.buckets.iter_mut().zip(bucket_positions) {
            *slot = match position {
                Some(pos) => match ids.get(pos) {
                    Some(&id) => Some(id),
                    None => return Err(format!("bucket head position {pos} out of range")),
                },
                None => None,
            };
        }
        Ok(table)
    }
}

impl<K, V> ChainHashMap<K, V>
where
    K: BucketKey + Eq + fmt::Debug,
{
    /// Walks the whole structure and panics with a state dump if any
    /// internal invariant is broken. For tests and postmortems; normal
    /// operations never call this.
    pub fn validate(&self) {
        let table_size = self.buckets.len();
        let mut seen_heads: Vec<Option<DefaultKey>> = vec![None; table_size];
        let mut closed = vec![false; table_size];
        let mut run_bucket: Option<usize> = None;
        let mut count = 0usize;
        let mut prev: Option<DefaultKey> = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let entry = match self.slots.get(id) {
                Some(entry) => entry,
                None => self.fail("list references a vacant slot"),
            };
            if entry.prev != prev {
                self.fail("back link does not match walk order");
            }
            if entry.bucket >= table_size {
                self.fail("entry bucket id out of range");
            }
            if entry.key.bucket(table_size) != entry.bucket {
                self.fail("stored bucket id disagrees with the hash");
            }
            if run_bucket != Some(entry.bucket) {
                if let Some(bucket) = run_bucket {
                    closed[bucket] = true;
                }
                if closed[entry.bucket] {
                    self.fail("bucket run is not contiguous");
                }
                run_bucket = Some(entry.bucket);
                seen_heads[entry.bucket] = Some(id);
            }
            count += 1;
            if count > self.slots.len() {
                self.fail("list is longer than the store (cycle?)");
            }
            prev = Some(id);
            cursor = entry.next;
        }
        if self.tail != prev {
            self.fail("tail does not match walk order");
        }
        if count != self.slots.len() {
            self.fail("reachable entries disagree with the store length");
        }
        if seen_heads != self.buckets {
            self.fail("bucket index disagrees with list runs");
        }
    }

    fn fail(&self, reason: &str) -> ! {
        use core::fmt::Write as _;

        let mut dump = String::new();
        let _ = writeln!(dump, "store length = {}", self.slots.len());
        let _ = writeln!(dump, "table size = {}", self.buckets.len());
        let _ = writeln!(dump, "store entries (position : bucket key):");
        let mut cursor = self.head;
        let mut pos = 0usize;
        while let Some(id) = cursor {
            let Some(entry) = self.slots.get(id) else {
                let _ = writeln!(dump, "  {pos} : <vacant slot>");
                break;
            };
            let _ = writeln!(dump, "  {pos} : {} {:?}", entry.bucket, entry.key);
            pos += 1;
            if pos > self.slots.len() {
                let _ = writeln!(dump, "  ... (cycle)");
                break;
            }
            cursor = entry.next;
        }
        let _ = writeln!(dump, "bucket heads:");
        for (bucket, head) in self.buckets.iter().enumerate() {
            match head.and_then(|id| self.slots.get(id)) {
                Some(entry) => {
                    let _ = writeln!(dump, "  {bucket} : {} {:?}", entry.bucket, entry.key);
                }
                None if head.is_some() => {
                    let _ = writeln!(dump, "  {bucket} : <vacant slot>");
                }
                None => {
                    let _ = writeln!(dump, "  {bucket} : NULL");
                }
            }
        }
        panic!("chain-hashmap invariant violated: {reason}\n{dump}");
    }
}

impl<K, V> Default for ChainHashMap<K, V>
where
    K: BucketKey + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over entries in store order.
pub struct Iter<'a, K, V> {
    slots: &'a SlotMap<DefaultKey, Entry<K, V>>,
    cursor: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let entry = &self.slots[id];
        self.cursor = entry.next;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Iterator over keys in store order.
pub struct Keys<'a, K, V>(Iter<'a, K, V>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// Iterator over values in store order.
pub struct Values<'a, K, V>(Iter<'a, K, V>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    // Keys 5 and 28 share bucket 5 in the default 23-bucket table; 6 gets
    // its own bucket. Several tests below lean on that.

    /// Invariant: within a bucket, iteration order is most-recently-added
    /// first; a fresh bucket's entry is appended at the store's end.
    #[test]
    fn insertion_order_per_bucket_and_store() {
        let mut table: ChainHashMap<i64, &str> = ChainHashMap::new();
        table.add(5, "five");
        table.add(6, "six");
        table.add(28, "twenty-eight");
        table.validate();

        let keys: Vec<i64> = table.keys().copied().collect();
        // 28 joins 5's run in front of it; the run stays contiguous.
        assert_eq!(keys, vec![28, 5, 6]);
    }

    /// Invariant: `add` permits duplicates; `find` returns the newest one.
    #[test]
    fn duplicate_add_finds_most_recent() {
        let mut table: ChainHashMap<i64, i32> = ChainHashMap::new();
        table.add(7, 1);
        table.add(7, 2);
        table.validate();

        assert_eq!(table.len(), 2);
        assert_eq!(table.find(&7), Some(&2));

        // Removing the first match re-exposes the older duplicate.
        assert_eq!(table.remove(&7), Ok(2));
        table.validate();
        assert_eq!(table.len(), 1);
        assert_eq!(table.find(&7), Some(&1));

        assert_eq!(table.remove(&7), Ok(1));
        table.validate();
        assert!(table.is_empty());
        assert_eq!(table.remove(&7), Err(TableError::KeyNotFound));
    }

    /// Invariant: removing a bucket head advances the head only when the
    /// next store entry still belongs to the bucket.
    #[test]
    fn remove_head_advances_or_empties_bucket() {
        let mut table: ChainHashMap<i64, &str> = ChainHashMap::new();
        table.add(5, "a");
        table.add(6, "b");
        table.add(28, "c");
        // Store order: 28, 5, 6.

        // 28 is bucket 5's head; 5 follows in the same bucket.
        assert_eq!(table.remove(&28), Ok("c"));
        table.validate();
        assert_eq!(table.find(&5), Some(&"a"));

        // Now 5 is the head and the next entry (6) is a different bucket.
        assert_eq!(table.remove(&5), Ok("a"));
        table.validate();
        assert!(!table.has_entry(&5));
        assert_eq!(table.find(&6), Some(&"b"));
    }

    /// Invariant: removing a non-head run member keeps the head in place.
    #[test]
    fn remove_mid_run_keeps_head() {
        let mut table: ChainHashMap<i64, i32> = ChainHashMap::new();
        table.add(5, 1);
        table.add(28, 2);
        // Run: 28 (head), 5.
        assert_eq!(table.remove(&5), Ok(1));
        table.validate();
        assert_eq!(table.find(&28), Some(&2));
    }

    /// `set_value` overwrites in place without growing the table; a second
    /// upsert of the same key is idempotent on the count.
    #[test]
    fn upsert_overwrites_in_place() {
        let mut table: ChainHashMap<i64, i32> = ChainHashMap::new();
        table.set_value(9, 1);
        table.set_value(9, 2);
        table.validate();
        assert_eq!(table.len(), 1);
        assert_eq!(table.find(&9), Some(&2));

        // Position is unchanged: 9 still heads its bucket after the upsert.
        table.add(32, 3); // 9 and 32 share bucket 9
        table.set_value(9, 4);
        table.validate();
        let keys: Vec<i64> = table.keys().copied().collect();
        assert_eq!(keys, vec![32, 9]);
    }

    /// Resizing drains the old store from its tail, so entries in distinct
    /// buckets come back in reverse store order.
    #[test]
    fn resize_reverses_store_order() {
        let mut table: ChainHashMap<i64, i32> = ChainHashMap::new();
        table.add(1, 10);
        table.add(2, 20);
        table.add(3, 30);
        assert_eq!(table.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);

        table.set_table_size(TABLE_SIZE_DEFAULT).unwrap();
        table.validate();
        assert_eq!(table.keys().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    /// Membership and values survive any positive resize, including down to
    /// a single bucket.
    #[test]
    fn resize_preserves_membership() {
        let mut table: ChainHashMap<i64, i64> = ChainHashMap::new();
        for key in 0..50 {
            table.add(key, key * 100);
        }
        for size in [1usize, 2, 7, 23, 331] {
            table.set_table_size(size).unwrap();
            table.validate();
            assert_eq!(table.table_size(), size);
            assert_eq!(table.len(), 50);
            for key in 0..50 {
                assert_eq!(table.find(&key), Some(&(key * 100)));
            }
        }
    }

    /// A zero table size is rejected and the table is left untouched.
    #[test]
    fn resize_rejects_zero() {
        let mut table: ChainHashMap<i64, i32> = ChainHashMap::new();
        table.add(5, 1);
        table.add(28, 2);
        let before: Vec<i64> = table.keys().copied().collect();

        assert_eq!(
            table.set_table_size(0),
            Err(TableError::InvalidTableSize(0))
        );
        table.validate();
        assert_eq!(table.table_size(), TABLE_SIZE_DEFAULT);
        assert_eq!(table.keys().copied().collect::<Vec<_>>(), before);
        assert_eq!(table.find(&5), Some(&1));

        assert_eq!(
            ChainHashMap::<i64, i32>::with_table_size(0).err(),
            Some(TableError::InvalidTableSize(0))
        );
    }

    /// `clear` empties the store and every bucket but keeps the table size.
    #[test]
    fn clear_empties_everything() {
        let mut table: ChainHashMap<i64, i32> =
            ChainHashMap::with_table_size(TABLE_SIZE_MEDIUM).unwrap();
        for key in 0..20 {
            table.add(key, key as i32);
        }
        table.clear();
        table.validate();
        assert!(table.is_empty());
        assert_eq!(table.table_size(), TABLE_SIZE_MEDIUM);
        assert!(!table.has_entry(&3));

        // The cleared table is fully usable.
        table.add(3, 33);
        table.validate();
        assert_eq!(table.find(&3), Some(&33));
    }

    /// `as_lists` sorts ascending by key with values kept parallel.
    #[test]
    fn as_lists_sorts_by_key() {
        let mut table: ChainHashMap<String, i32> = ChainHashMap::new();
        table.add("b".to_string(), 2);
        table.add("a".to_string(), 1);
        table.add("c".to_string(), 3);

        let (keys, values) = table.as_lists();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(values, vec![1, 2, 3]);
    }

    /// With duplicate keys, `as_lists` places later-stored entries first
    /// among equals (the scan inserts in front of the first non-smaller key).
    #[test]
    fn as_lists_orders_equal_keys_by_reverse_store_order() {
        let mut table: ChainHashMap<String, i32> = ChainHashMap::new();
        table.add("k".to_string(), 1);
        table.add("k".to_string(), 2);
        // Store order: 2 then 1; both scans insert at the front.
        let (keys, values) = table.as_lists();
        assert_eq!(keys, vec!["k".to_string(), "k".to_string()]);
        assert_eq!(values, vec![1, 2]);
    }

    /// `find_mut` mutates in place; borrowed (`&str`) lookups reach
    /// `String`-keyed entries.
    #[test]
    fn find_mut_and_borrowed_lookup() {
        let mut table: ChainHashMap<String, i32> = ChainHashMap::new();
        table.add("hello".to_string(), 1);
        assert!(table.has_entry("hello"));
        assert!(!table.has_entry("world"));

        *table.find_mut("hello").unwrap() += 10;
        assert_eq!(table.find("hello"), Some(&11));
    }

    /// Iterators report exact sizes and are restartable.
    #[test]
    fn iterators_are_exact_and_restartable() {
        let mut table: ChainHashMap<i64, i32> = ChainHashMap::new();
        for key in 0..5 {
            table.add(key, key as i32);
        }
        let it = table.iter();
        assert_eq!(it.len(), 5);
        assert_eq!(it.count(), 5);
        // A second pass sees the same entries.
        assert_eq!(table.values().count(), 5);
        assert_eq!(table.keys().len(), 5);
    }
}
