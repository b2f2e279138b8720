mod local;
mod memory;

pub use local::LocalStorage;
pub use memory::MemoryStorage;

use crate::constants::{LAST_DESTINATION_KEY, LAST_SOURCE_KEY, LAST_TRAIN_ID_KEY};

/// String key-value persistence for the page's remembered selections
pub trait KeyValueStore {
    /// Read a value, `None` when unset or when the backend is unavailable
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable or rejects the write
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
}

/// Selections remembered from a previous visit
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SavedSelection {
    pub source: Option<String>,
    pub destination: Option<String>,
    pub train_id: Option<String>,
}

impl SavedSelection {
    #[must_use]
    pub fn load(store: &impl KeyValueStore) -> Self {
        let read = |key: &str| store.get(key).filter(|v: &String| !v.is_empty());
        Self {
            source: read(LAST_SOURCE_KEY),
            destination: read(LAST_DESTINATION_KEY),
            train_id: read(LAST_TRAIN_ID_KEY),
        }
    }
}

/// Write a value, logging instead of failing when the store refuses it
pub fn persist(store: &impl KeyValueStore, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        leptos::logging::warn!("Failed to persist {key}: {e}");
    }
}
