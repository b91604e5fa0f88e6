//! Key-value persistence for preferences, local high scores and session data
//!
//! The browser build stores JSON strings in LocalStorage. Native builds and
//! tests use an in-memory map. Storage failures are logged and read back as
//! "absent"; nothing here returns an error to gameplay code.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// String key-value storage with LocalStorage semantics
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    /// Returns false if the value could not be stored
    fn set_item(&self, key: &str, value: &str) -> bool;
    fn remove_item(&self, key: &str);
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> bool {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - nothing will persist");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> bool {
        match &self.storage {
            Some(storage) => storage.set_item(key, value).is_ok(),
            None => false,
        }
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.remove_item(key);
        }
    }
}

/// Read and decode a JSON value. Missing or corrupt entries come back as None.
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let json = store.get_item(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring unreadable '{}' entry: {}", key, e);
            None
        }
    }
}

/// Encode and write a JSON value. Returns false if nothing was stored.
pub fn save_json<T: Serialize>(store: &impl KeyValueStore, key: &str, value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(json) => {
            let stored = store.set_item(key, &json);
            if !stored {
                log::warn!("Failed to store '{}'", key);
            }
            stored
        }
        Err(e) => {
            log::error!("Failed to encode '{}': {}", key, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        n: u32,
    }

    #[test]
    fn test_json_round_trip_through_store() {
        let store = MemoryStore::new();
        assert!(save_json(&store, "k", &Sample { n: 3 }));
        assert_eq!(load_json::<Sample>(&store, "k"), Some(Sample { n: 3 }));
    }

    #[test]
    fn test_corrupt_entry_reads_as_absent() {
        let store = MemoryStore::new();
        store.set_item("k", "{not json");
        assert_eq!(load_json::<Sample>(&store, "k"), None);
    }

    #[test]
    fn test_remove() {
        let store = MemoryStore::new();
        store.set_item("k", "1");
        store.remove_item("k");
        assert_eq!(store.get_item("k"), None);
    }
}
