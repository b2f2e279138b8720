use super::KeyValueStore;

/// Browser `localStorage`, shared by every tab of the origin and kept across reloads
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        window.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        let storage = Self::storage()?;
        storage.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let storage = Self::storage().ok_or("localStorage not available")?;
        storage
            .set_item(key, value)
            .map_err(|e| format!("Failed to write {key}: {e:?}"))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_set_and_get() {
        let storage = LocalStorage;
        storage.set("train_crowd_test_key", "12951").unwrap();
        assert_eq!(storage.get("train_crowd_test_key"), Some("12951".to_string()));
    }

    #[wasm_bindgen_test]
    fn test_get_missing_key() {
        let storage = LocalStorage;
        assert_eq!(storage.get("train_crowd_missing_key_12345"), None);
    }

    #[wasm_bindgen_test]
    fn test_overwrite() {
        let storage = LocalStorage;
        storage.set("train_crowd_overwrite", "a").unwrap();
        storage.set("train_crowd_overwrite", "b").unwrap();
        assert_eq!(storage.get("train_crowd_overwrite"), Some("b".to_string()));
    }
}
