//! SharedRegistry: a dictionary behind a mutex, for component registries
//! shared across threads.
//!
//! The lock is scoped to each accessor; nothing is held across calls. There
//! is no global instance and no construct-on-first-use: the composition
//! root builds the registry, owns it (typically inside an `Arc`), and tears
//! it down like any other value.

use std::sync::{Mutex, MutexGuard};

use crate::dictionary::Dictionary;
use crate::error::TableError;

/// Thread-safe registry of named components, register-once semantics.
pub struct SharedRegistry<V> {
    entries: Mutex<Dictionary<V>>,
}

impl<V> SharedRegistry<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Dictionary::new()),
        }
    }

    pub fn with_table_size(table_size: usize) -> Result<Self, TableError> {
        Ok(Self {
            entries: Mutex::new(Dictionary::with_table_size(table_size)?),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Dictionary<V>> {
        // Every dictionary mutation completes or does not start, so a
        // poisoned lock still guards a consistent table; keep using it.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Registers `name` if it is not already taken. Returns whether the
    /// registration happened; an existing entry is never overwritten.
    pub fn register(&self, name: &str, value: V) -> bool {
        let mut entries = self.lock();
        if entries.has_entry(name) {
            return false;
        }
        entries.set_value(name, value);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().has_entry(name)
    }

    /// Clone of the component registered under `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<V>
    where
        V: Clone,
    {
        self.lock().find(name).cloned()
    }

    /// Closest registered name to `name`; used for "did you mean" output.
    pub fn near_match(&self, name: &str) -> String {
        self.lock().near_match(name)
    }

    /// Registered names, sorted ascending.
    pub fn names(&self) -> Vec<String>
    where
        V: Clone,
    {
        self.lock().as_lists().0
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl<V> Default for SharedRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Register-once: the second registration of a name is refused and the
    /// first value stays.
    #[test]
    fn register_is_first_wins() {
        let registry: SharedRegistry<i32> = SharedRegistry::new();
        assert!(registry.register("gestation", 1));
        assert!(!registry.register("gestation", 2));
        assert_eq!(registry.lookup("gestation"), Some(1));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lookup_and_near_match() {
        let registry: SharedRegistry<&'static str> = SharedRegistry::new();
        registry.register("energy", "trait");
        registry.register("age", "trait");
        assert!(registry.contains("energy"));
        assert_eq!(registry.lookup("missing"), None);
        assert_eq!(registry.near_match("energy2"), "energy");
        assert_eq!(registry.names(), vec!["age".to_string(), "energy".to_string()]);
    }

    /// The registry is shareable across threads; concurrent registration of
    /// the same name admits exactly one winner.
    #[test]
    fn concurrent_registration_single_winner() {
        let registry: SharedRegistry<usize> = SharedRegistry::new();
        let winners = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let registry = &registry;
                    scope.spawn(move || registry.register("contested", i))
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|won| *won)
                .count()
        });
        assert_eq!(winners, 1);
        assert!(registry.lookup("contested").is_some());
    }
}
