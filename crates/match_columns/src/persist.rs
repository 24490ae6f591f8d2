// SPDX-License-Identifier: MIT OR Apache-2.0
//! Saving and restoring pairs through an abstract key-value store.
//!
//! Pairs are stored as a JSON array of `{"leftId", "rightId"}` records under
//! a caller-chosen slot key. The format carries no version tag; if it ever
//! changes, compatibility is the caller's concern. Storage failures never
//! surface past this module: a failed read behaves like an absent slot and a
//! failed write like no write at all, with a log line either way.

use crate::pair::Pair;
use std::collections::HashMap;

/// Slot the widget saves under when no other key is configured.
pub const DEFAULT_SLOT: &str = "match-columns-v1";

/// Abstract string key-value storage.
///
/// Implementations are expected to be cheap to call and to swallow their own
/// I/O failures; see [`MemoryStore`] for the reference behavior and the demo
/// application for a file-backed version.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, overwriting any existing value.
    fn set(&mut self, key: &str, value: &str);

    /// Delete the value stored under `key`, if any.
    fn remove(&mut self, key: &str);
}

/// In-memory store for tests and headless use.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Serialize `pairs` and write them under `key`, overwriting the slot.
pub fn save(store: &mut dyn KeyValueStore, key: &str, pairs: &[Pair]) {
    match serde_json::to_string(pairs) {
        Ok(json) => store.set(key, &json),
        Err(e) => tracing::warn!("Failed to serialize pairs for slot '{key}': {e}"),
    }
}

/// Read and deserialize the pairs stored under `key`.
///
/// An absent slot or unreadable data yields `None`; malformed data is logged
/// and otherwise treated like an empty slot.
pub fn load(store: &dyn KeyValueStore, key: &str) -> Option<Vec<Pair>> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(pairs) => Some(pairs),
        Err(e) => {
            tracing::warn!("Discarding unreadable pair data in slot '{key}': {e}");
            None
        }
    }
}

/// Delete whatever is stored under `key`.
pub fn remove(store: &mut dyn KeyValueStore, key: &str) {
    store.remove(key);
}
