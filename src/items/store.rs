//! In-memory item store.
//!
//! # Responsibilities
//! - Hold the ordered collection of items for the process lifetime
//! - Assign unique identifiers at append time
//! - Replace and remove items by identifier
//!
//! # Design Decisions
//! - Owned by the application state and injected into handlers, never a
//!   process-wide singleton, so tests get isolated stores
//! - Interior mutex makes each operation atomic on the multi-threaded
//!   runtime; `list` returns a clone so callers hold a true snapshot
//! - Identifiers are UUIDv7 strings: time-ordered, derived from the
//!   creation instant, and unique even for same-instant appends

use std::sync::Mutex;

use uuid::Uuid;

use crate::items::types::{Item, NewItem};

/// The ordered in-memory item collection.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: Mutex<Vec<Item>>,
}

impl ItemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the full ordered sequence.
    ///
    /// The returned vector does not reflect later mutations.
    pub fn list(&self) -> Vec<Item> {
        self.items.lock().expect("item store mutex poisoned").clone()
    }

    /// Append a normalized record, assigning a fresh identifier.
    pub fn append(&self, new: NewItem) -> Item {
        let item = Item {
            id: Uuid::now_v7().to_string(),
            name: new.name,
            done: new.done,
        };
        let mut items = self.items.lock().expect("item store mutex poisoned");
        items.push(item.clone());
        item
    }

    /// Overwrite the non-id fields of the first item with a matching id.
    ///
    /// Returns the updated item, or `None` when no item matches.
    pub fn replace_by_id(&self, id: &str, new: NewItem) -> Option<Item> {
        let mut items = self.items.lock().expect("item store mutex poisoned");
        let item = items.iter_mut().find(|item| item.id == id)?;
        item.name = new.name;
        item.done = new.done;
        Some(item.clone())
    }

    /// Remove all items with a matching id (expected: zero or one).
    ///
    /// Returns whether a removal occurred.
    pub fn remove_by_id(&self, id: &str) -> bool {
        let mut items = self.items.lock().expect("item store mutex poisoned");
        let before = items.len();
        items.retain(|item| item.id != id);
        items.len() != before
    }

    /// Number of items currently held.
    pub fn len(&self) -> usize {
        self.items.lock().expect("item store mutex poisoned").len()
    }

    /// Whether the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item(name: &str) -> NewItem {
        NewItem {
            name: name.to_string(),
            done: false,
        }
    }

    #[test]
    fn append_assigns_unique_ids() {
        let store = ItemStore::new();
        let mut ids: Vec<String> = (0..50)
            .map(|i| store.append(new_item(&format!("item {i}"))).id)
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn list_returns_a_snapshot() {
        let store = ItemStore::new();
        store.append(new_item("first"));
        let snapshot = store.list();
        store.append(new_item("second"));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn replace_preserves_id_and_position() {
        let store = ItemStore::new();
        store.append(new_item("first"));
        let target = store.append(new_item("second"));
        store.append(new_item("third"));

        let updated = store
            .replace_by_id(
                &target.id,
                NewItem {
                    name: "renamed".to_string(),
                    done: true,
                },
            )
            .unwrap();

        assert_eq!(updated.id, target.id);
        assert_eq!(updated.name, "renamed");
        assert!(updated.done);

        let names: Vec<String> = store.list().into_iter().map(|item| item.name).collect();
        assert_eq!(names, vec!["first", "renamed", "third"]);
    }

    #[test]
    fn replace_unknown_id_is_none_and_leaves_store_intact() {
        let store = ItemStore::new();
        let existing = store.append(new_item("only"));

        assert!(store.replace_by_id("missing", new_item("ghost")).is_none());
        assert_eq!(store.list(), vec![existing]);
    }

    #[test]
    fn remove_reports_whether_anything_was_removed() {
        let store = ItemStore::new();
        let item = store.append(new_item("target"));

        assert!(store.remove_by_id(&item.id));
        assert!(!store.remove_by_id(&item.id));
        assert!(store.is_empty());
    }

    #[test]
    fn survivors_keep_insertion_order() {
        let store = ItemStore::new();
        let created: Vec<Item> = (0..5)
            .map(|i| store.append(new_item(&format!("item {i}"))))
            .collect();

        store.remove_by_id(&created[1].id);
        store.remove_by_id(&created[3].id);

        let names: Vec<String> = store.list().into_iter().map(|item| item.name).collect();
        assert_eq!(names, vec!["item 0", "item 2", "item 4"]);
    }
}
