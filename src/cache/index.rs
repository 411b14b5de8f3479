//! Key Index Module
//!
//! Maps application keys to the list node currently holding their value.

use std::collections::HashMap;

use crate::cache::NodeRef;

// == Key Index ==
/// Bidirectional key <-> node mapping.
///
/// The reverse side lets removals performed inside the list (which only knows
/// handles) be traced back to the key they belonged to.
#[derive(Debug, Default)]
pub struct KeyIndex {
    by_key: HashMap<String, NodeRef>,
    by_node: HashMap<NodeRef, String>,
}

impl KeyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points `key` at `node`, dropping whatever handle it had before.
    pub fn insert(&mut self, key: String, node: NodeRef) {
        if let Some(previous) = self.by_key.insert(key.clone(), node) {
            self.by_node.remove(&previous);
        }
        self.by_node.insert(node, key);
    }

    pub fn get(&self, key: &str) -> Option<NodeRef> {
        self.by_key.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Removes `key`, returning the handle it pointed at.
    pub fn remove_key(&mut self, key: &str) -> Option<NodeRef> {
        let node = self.by_key.remove(key)?;
        self.by_node.remove(&node);
        Some(node)
    }

    /// Removes whichever key points at `node`, returning it.
    pub fn remove_node(&mut self, node: NodeRef) -> Option<String> {
        let key = self.by_node.remove(&node)?;
        self.by_key.remove(&key);
        Some(key)
    }

    /// Snapshot of every key, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.by_key.keys().cloned().collect()
    }

    /// Snapshot of every key containing `needle`.
    pub fn keys_containing(&self, needle: &str) -> Vec<String> {
        self.by_key
            .keys()
            .filter(|key| key.contains(needle))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_key.clear();
        self.by_node.clear();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{EntryOptions, OrderedList};

    #[test]
    fn test_index_insert_and_lookup() {
        let mut list = OrderedList::new(5);
        let mut index = KeyIndex::new();
        let node = list.enqueue("v", EntryOptions::new());

        index.insert("a".to_string(), node);
        assert_eq!(index.get("a"), Some(node));
        assert!(index.contains_key("a"));
        assert!(!index.contains_key("b"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_index_reinsert_drops_old_reverse_entry() {
        let mut list = OrderedList::new(5);
        let mut index = KeyIndex::new();
        let first = list.enqueue("v1", EntryOptions::new());
        let second = list.enqueue("v2", EntryOptions::new());

        index.insert("a".to_string(), first);
        index.insert("a".to_string(), second);

        assert_eq!(index.remove_node(first), None);
        assert_eq!(index.get("a"), Some(second));
        assert_eq!(index.remove_node(second), Some("a".to_string()));
        assert!(index.is_empty());
    }

    #[test]
    fn test_index_remove_key() {
        let mut list = OrderedList::new(5);
        let mut index = KeyIndex::new();
        let node = list.enqueue("v", EntryOptions::new());
        index.insert("a".to_string(), node);

        assert_eq!(index.remove_key("a"), Some(node));
        assert_eq!(index.remove_key("a"), None);
        assert_eq!(index.remove_node(node), None);
    }

    #[test]
    fn test_index_keys_containing() {
        let mut list = OrderedList::new(5);
        let mut index = KeyIndex::new();
        for key in ["user:1", "user:2", "session:1"] {
            let node = list.enqueue(key, EntryOptions::new());
            index.insert(key.to_string(), node);
        }

        let mut users = index.keys_containing("user");
        users.sort();
        assert_eq!(users, vec!["user:1".to_string(), "user:2".to_string()]);
        assert_eq!(index.keys_containing(":1").len(), 2);
        assert_eq!(index.keys().len(), 3);

        index.clear();
        assert!(index.is_empty());
    }
}
