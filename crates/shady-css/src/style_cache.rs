//! Fingerprinted style cache
//!
//! Caches values per string key, with several entries per key told apart by
//! the custom property values they were computed under. An entry matches a
//! lookup when every watched property has the same value in the stored and
//! the live table. Entries are never evicted.

use std::collections::{BTreeSet, HashMap};

use crate::variables::PropertyTable;

#[derive(Debug)]
struct CacheEntry<V> {
    properties: PropertyTable,
    value: V,
}

impl<V> CacheEntry<V> {
    fn matches(&self, properties: &PropertyTable, names: &BTreeSet<String>) -> bool {
        names
            .iter()
            .all(|name| self.properties.get(name) == properties.get(name))
    }
}

/// Style cache keyed by string and property fingerprint
#[derive(Debug)]
pub struct StyleCache<V> {
    entries: HashMap<String, Vec<CacheEntry<V>>>,
    /// Cache hits counter
    hits: u64,
    /// Cache misses counter
    misses: u64,
}

impl<V> Default for StyleCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> StyleCache<V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up the most recent entry for `key` whose watched `names` agree
    /// with `properties`
    pub fn fetch(
        &mut self,
        key: &str,
        properties: &PropertyTable,
        names: &BTreeSet<String>,
    ) -> Option<&V> {
        let found = self
            .entries
            .get(key)
            .and_then(|list| list.iter().rposition(|e| e.matches(properties, names)));

        match found {
            Some(index) => {
                self.hits += 1;
                self.entries.get(key).map(|list| &list[index].value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store a value computed under `properties`
    pub fn store(&mut self, key: &str, properties: PropertyTable, value: V) {
        self.entries
            .entry(key.to_string())
            .or_default()
            .push(CacheEntry { properties, value });
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.values().map(Vec::len).sum();
        CacheStats {
            keys: self.entries.len(),
            entries,
            hits: self.hits,
            misses: self.misses,
            hit_rate: if self.hits + self.misses > 0 {
                self.hits as f64 / (self.hits + self.misses) as f64
            } else {
                0.0
            },
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub keys: usize,
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(entries: &[(&str, &str)]) -> PropertyTable {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn names(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cache_hit() {
        let mut cache = StyleCache::new();
        cache.store("k", props(&[("--a", "1")]), 7);

        assert_eq!(cache.fetch("k", &props(&[("--a", "1")]), &names(&["--a"])), Some(&7));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_cache_miss_on_changed_value() {
        let mut cache = StyleCache::new();
        cache.store("k", props(&[("--a", "1")]), 7);

        assert_eq!(cache.fetch("k", &props(&[("--a", "2")]), &names(&["--a"])), None);
        assert_eq!(cache.fetch("other", &props(&[("--a", "1")]), &names(&["--a"])), None);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_unwatched_properties_ignored() {
        let mut cache = StyleCache::new();
        cache.store("k", props(&[("--a", "1"), ("--b", "x")]), 1);

        let live = props(&[("--a", "1"), ("--b", "y")]);
        assert_eq!(cache.fetch("k", &live, &names(&["--a"])), Some(&1));
        assert_eq!(cache.fetch("k", &live, &names(&["--a", "--b"])), None);
    }

    #[test]
    fn test_entries_accumulate() {
        let mut cache = StyleCache::new();
        cache.store("k", props(&[("--a", "1")]), 1);
        cache.store("k", props(&[("--a", "2")]), 2);

        assert_eq!(cache.fetch("k", &props(&[("--a", "1")]), &names(&["--a"])), Some(&1));
        assert_eq!(cache.stats().entries, 2);
        assert_eq!(cache.stats().keys, 1);
    }
}
