//! Checkpoint serialization for tables (feature `serde`).
//!
//! The persisted form carries the entry store in its exact iteration order
//! (each entry with its stored bucket id) and the bucket index as positions
//! into that order. Bucket ids would be cheap to recompute on restore, but
//! the store's contiguity order after a history of inserts, removals, and
//! rehashes cannot be rebuilt from them — so both are reloaded verbatim and
//! a restored table reproduces the prior layout exactly.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::chain_hash_map::ChainHashMap;
use crate::dictionary::Dictionary;
use crate::hash::BucketKey;

#[derive(Serialize)]
struct EntryOut<'a, K, V> {
    key: &'a K,
    bucket: usize,
    value: &'a V,
}

#[derive(Serialize)]
struct TableOut<'a, K, V> {
    entry_count: usize,
    table_size: usize,
    entries: Vec<EntryOut<'a, K, V>>,
    buckets: Vec<Option<usize>>,
}

#[derive(Deserialize)]
struct EntryIn<K, V> {
    key: K,
    bucket: usize,
    value: V,
}

#[derive(Deserialize)]
struct TableIn<K, V> {
    entry_count: usize,
    table_size: usize,
    entries: Vec<EntryIn<K, V>>,
    buckets: Vec<Option<usize>>,
}

impl<K, V> Serialize for ChainHashMap<K, V>
where
    K: BucketKey + Eq + Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (entries, buckets) = self.persist_parts();
        TableOut {
            entry_count: self.len(),
            table_size: self.table_size(),
            entries: entries
                .into_iter()
                .map(|(key, bucket, value)| EntryOut { key, bucket, value })
                .collect(),
            buckets,
        }
        .serialize(serializer)
    }
}

impl<'de, K, V> Deserialize<'de> for ChainHashMap<K, V>
where
    K: BucketKey + Eq + Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = TableIn::<K, V>::deserialize(deserializer)?;
        if raw.entry_count != raw.entries.len() {
            return Err(D::Error::custom(format!(
                "entry count {} disagrees with {} serialized entries",
                raw.entry_count,
                raw.entries.len()
            )));
        }
        let entries = raw
            .entries
            .into_iter()
            .map(|e| (e.key, e.bucket, e.value))
            .collect();
        ChainHashMap::from_persist_parts(raw.table_size, entries, raw.buckets)
            .map_err(D::Error::custom)
    }
}

impl<V: Serialize> Serialize for Dictionary<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.table.serialize(serializer)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Dictionary<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Dictionary {
            table: ChainHashMap::deserialize(deserializer)?,
        })
    }
}
