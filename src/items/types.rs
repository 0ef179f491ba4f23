//! Item collection types.

use serde::{Deserialize, Serialize};

/// A record in the item collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned identifier (UUIDv7, immutable after creation).
    pub id: String,
    /// Display name, non-empty after trimming, at most 120 characters.
    pub name: String,
    /// Completion flag, defaults to false.
    pub done: bool,
}

/// Normalized input accepted by the store.
///
/// Produced only by validation; carries the trimmed name and the resolved
/// `done` flag, never an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    /// Trimmed display name.
    pub name: String,
    /// Resolved completion flag.
    pub done: bool,
}
