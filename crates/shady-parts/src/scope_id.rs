//! Per-instance part ids
//!
//! Two hosts whose visible custom properties agree share the generated rules
//! for a part; a host with different values gets a fresh id and its own
//! rules.

use std::collections::BTreeSet;

use shady_css::{CacheStats, PropertyTable, StyleCache};

/// Id assigned to a part under one property fingerprint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartId {
    pub id: String,
    /// True when the id was minted by this lookup
    pub is_new: bool,
}

/// Fingerprint-keyed part id allocator
#[derive(Debug, Default)]
pub struct ScopeIdCache {
    cache: StyleCache<String>,
    next_id: u64,
}

impl ScopeIdCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `part_name` styled from `parent_scope` on `child_scope`
    /// elements, under the live property values
    pub fn get_part_id(
        &mut self,
        part_name: &str,
        parent_scope: &str,
        child_scope: &str,
        properties: &PropertyTable,
        names: &BTreeSet<String>,
    ) -> PartId {
        let key = format!("{part_name},{parent_scope},{child_scope}");
        if let Some(id) = self.cache.fetch(&key, properties, names) {
            return PartId {
                id: id.clone(),
                is_new: false,
            };
        }

        let id = self.next_id.to_string();
        self.next_id += 1;
        self.cache.store(&key, properties.clone(), id.clone());
        tracing::trace!("New part id {} for {}", id, key);
        PartId { id, is_new: true }
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
