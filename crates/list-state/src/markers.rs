//! Favorite / Read Markers
//!
//! Local, non-authoritative flags per record id. Both sets live in one JSON
//! blob under a single shared key.

use std::collections::BTreeSet;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::storage::{load_json, save_json, KeyValueStore};

pub const MARKERS_KEY: &str = "media_library:markers";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct MarkerSets {
    #[serde(default)]
    favorites: BTreeSet<String>,
    #[serde(default)]
    read: BTreeSet<String>,
}

#[derive(Clone)]
pub struct MarkerStore {
    store: Rc<dyn KeyValueStore>,
}

impl MarkerStore {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    // Read through on every call; another tab may have written since.
    fn load(&self) -> MarkerSets {
        load_json(self.store.as_ref(), MARKERS_KEY).unwrap_or_default()
    }

    fn save(&self, sets: &MarkerSets) {
        save_json(self.store.as_ref(), MARKERS_KEY, sets);
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.load().favorites.contains(id)
    }

    /// Returns the new membership
    pub fn toggle_favorite(&self, id: &str) -> bool {
        let mut sets = self.load();
        let now = if sets.favorites.remove(id) {
            false
        } else {
            sets.favorites.insert(id.to_string());
            true
        };
        self.save(&sets);
        now
    }

    pub fn favorites(&self) -> Vec<String> {
        self.load().favorites.into_iter().collect()
    }

    pub fn is_read(&self, id: &str) -> bool {
        self.load().read.contains(id)
    }

    pub fn mark_read(&self, id: &str) {
        let mut sets = self.load();
        if sets.read.insert(id.to_string()) {
            self.save(&sets);
        }
    }

    pub fn toggle_read(&self, id: &str) -> bool {
        let mut sets = self.load();
        let now = if sets.read.remove(id) {
            false
        } else {
            sets.read.insert(id.to_string());
            true
        };
        self.save(&sets);
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn markers() -> (Rc<MemoryStore>, MarkerStore) {
        let store = Rc::new(MemoryStore::new());
        (store.clone(), MarkerStore::new(store))
    }

    #[test]
    fn test_toggle_favorite_twice_restores() {
        let (_, m) = markers();
        assert!(!m.is_favorite("42"));
        assert!(m.toggle_favorite("42"));
        assert!(m.is_favorite("42"));
        assert!(!m.toggle_favorite("42"));
        assert!(!m.is_favorite("42"));
    }

    #[test]
    fn test_sets_are_independent_and_shared_key() {
        let (store, m) = markers();
        m.toggle_favorite("7");
        m.mark_read("8");
        m.mark_read("8");

        assert!(m.is_read("8"));
        assert!(!m.is_read("7"));
        assert_eq!(store.len(), 1);

        // a second handle over the same storage sees the same flags
        let other = MarkerStore::new(store);
        assert_eq!(other.favorites(), vec!["7".to_string()]);
        assert!(!other.toggle_read("8"));
    }

    #[test]
    fn test_corrupt_blob_reads_empty() {
        let (store, m) = markers();
        store.set(MARKERS_KEY, "[1,2");
        assert!(!m.is_favorite("1"));
        assert!(m.toggle_favorite("1"));
    }
}
