//! Dictionary: string-keyed wrapper over [`ChainHashMap`] with text loading
//! and fuzzy name lookup.

use core::fmt;
use core::str::FromStr;

use crate::chain_hash_map::{ChainHashMap, Iter, Keys, Values};
use crate::error::TableError;

/// Name-to-value registry backing instruction sets, trait tables, and
/// configuration dictionaries.
///
/// Everything except [`Dictionary::load`] and [`Dictionary::near_match`] is
/// verbatim delegation to the inner table; see [`ChainHashMap`] for ordering
/// and duplicate-key semantics.
pub struct Dictionary<V> {
    pub(crate) table: ChainHashMap<String, V>,
}

impl<V> Dictionary<V> {
    pub fn new() -> Self {
        Self {
            table: ChainHashMap::new(),
        }
    }

    pub fn with_table_size(table_size: usize) -> Result<Self, TableError> {
        Ok(Self {
            table: ChainHashMap::with_table_size(table_size)?,
        })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn table_size(&self) -> usize {
        self.table.table_size()
    }

    pub fn add(&mut self, name: impl Into<String>, value: V) {
        self.table.add(name.into(), value);
    }

    pub fn set_value(&mut self, name: impl Into<String>, value: V) {
        self.table.set_value(name.into(), value);
    }

    pub fn has_entry(&self, name: &str) -> bool {
        self.table.has_entry(name)
    }

    pub fn find(&self, name: &str) -> Option<&V> {
        self.table.find(name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut V> {
        self.table.find_mut(name)
    }

    pub fn remove(&mut self, name: &str) -> Result<V, TableError> {
        self.table.remove(name)
    }

    pub fn set_table_size(&mut self, table_size: usize) -> Result<(), TableError> {
        self.table.set_table_size(table_size)
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn iter(&self) -> Iter<'_, String, V> {
        self.table.iter()
    }

    pub fn keys(&self) -> Keys<'_, String, V> {
        self.table.keys()
    }

    pub fn values(&self) -> Values<'_, String, V> {
        self.table.values()
    }

    pub fn as_lists(&self) -> (Vec<String>, Vec<V>)
    where
        V: Clone,
    {
        self.table.as_lists()
    }

    /// Parses a `name=value` line and upserts the result; see
    /// [`Dictionary::load_with`].
    pub fn load(&mut self, line: &str) -> Result<(), TableError>
    where
        V: FromStr,
        V::Err: fmt::Display,
    {
        self.load_with(line, '=')
    }

    /// Splits `line` at the first `separator` into a name and a value text,
    /// parses the value with the value type's `FromStr`, and upserts it.
    ///
    /// A line without the separator is all name; the value text is then
    /// empty and still goes through the same parse (which may fail — an
    /// empty string is not an integer, but it is a `String`).
    pub fn load_with(&mut self, line: &str, separator: char) -> Result<(), TableError>
    where
        V: FromStr,
        V::Err: fmt::Display,
    {
        let (name, value_text) = match line.split_once(separator) {
            Some((name, rest)) => (name, rest),
            None => (line, ""),
        };
        let value = value_text.parse::<V>().map_err(|e| TableError::Parse {
            key: name.to_string(),
            reason: e.to_string(),
        })?;
        self.set_value(name, value);
        Ok(())
    }

    /// Closest stored name to `name` by edit distance.
    ///
    /// The bar starts at `name`'s own length (the cost of replacing every
    /// character), and a key must strictly beat the current best; ties keep
    /// the earlier key in store order. Returns the empty string when no key
    /// clears the bar — absence of a reasonable match, not an error.
    pub fn near_match(&self, name: &str) -> String {
        let mut best_match = String::new();
        let mut best_dist = name.chars().count();
        for key in self.table.keys() {
            let dist = edit_distance(name, key);
            if dist < best_dist {
                best_dist = dist;
                best_match = key.clone();
            }
        }
        best_match
    }
}

impl<V> Default for Dictionary<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Levenshtein distance between `a` and `b`, counted in characters.
/// Two-row dynamic programming; O(|a|*|b|) time, O(|b|) space.
fn edit_distance(a: &str, b: &str) -> usize {
    if a.is_empty() {
        return b.chars().count();
    }
    if b.is_empty() {
        return a.chars().count();
    }

    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut cur = vec![0usize; b_chars.len() + 1];
    for (i, ca) in a.chars().enumerate() {
        cur[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let substitute = prev[j] + usize::from(ca != cb);
            let delete = prev[j + 1] + 1;
            let insert = cur[j] + 1;
            cur[j + 1] = substitute.min(delete).min(insert);
        }
        core::mem::swap(&mut prev, &mut cur);
    }
    prev[b_chars.len()]
}
