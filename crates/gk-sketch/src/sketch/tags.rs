//! Tag index
//!
//! Maps each tag to the positions of the entities carrying it, in insertion
//! order. Entries are appended as entities are added; lookups never scan the
//! entity lists.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::entity::EntityKind;

/// Position of an entity inside a sketch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    /// Which list the entity lives in
    pub kind: EntityKind,
    /// Index into that list
    pub index: usize,
}

impl EntityKey {
    pub fn new(kind: EntityKind, index: usize) -> Self {
        Self { kind, index }
    }
}

/// Ordered multimap from tag to entity keys
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    buckets: HashMap<String, Vec<EntityKey>>,
    /// Tags in order of first use
    order: Vec<String>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` under `tag`
    pub fn insert(&mut self, tag: &str, key: EntityKey) {
        match self.buckets.get_mut(tag) {
            Some(keys) => keys.push(key),
            None => {
                self.order.push(tag.to_string());
                self.buckets.insert(tag.to_string(), vec![key]);
            }
        }
    }

    /// Keys recorded under `tag`, oldest first; empty for unknown tags
    pub fn get(&self, tag: &str) -> &[EntityKey] {
        self.buckets.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distinct tags in order of first use
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut index = TagIndex::new();
        let a = EntityKey::new(EntityKind::Edge, 0);
        let b = EntityKey::new(EntityKind::Face, 0);
        let c = EntityKey::new(EntityKind::Edge, 1);

        index.insert("t1", a);
        index.insert("t1", b);
        index.insert("t2", c);

        assert_eq!(index.get("t1"), &[a, b]);
        assert_eq!(index.get("t2"), &[c]);
        assert!(index.get("unknown").is_empty());
        assert_eq!(index.tags().collect::<Vec<_>>(), vec!["t1", "t2"]);
    }
}
