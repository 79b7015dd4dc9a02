//! Persistence adapter: string-keyed JSON blobs in a durable key-value store.
//!
//! Reads never fail outward. A missing key yields `None`; a value that does
//! not parse is logged and also yields `None`, so callers fall back to an
//! empty default. Write failures are logged and swallowed.

use crate::error::{StoreError, StoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Storage keys used by the storefront.
pub mod keys {
    pub const CART: &str = "cart";
    pub const WISHLIST: &str = "wishlist";
    pub const COMPARISON: &str = "comparison";
    pub const PRODUCT_REVIEWS: &str = "productReviews";
    pub const RECENT_SEARCHES: &str = "recentSearches";
    pub const NEWSLETTER_SUBSCRIPTIONS: &str = "newsletter_subscriptions";
    pub const DISMISSED_BANNERS: &str = "dismissed_banners";
    pub const MARKETING_CAMPAIGNS: &str = "marketing_campaigns";
    pub const MARKETING_INTERACTIONS: &str = "marketing_interactions";
}

/// Raw key-value backend.
pub trait KeyValueStore: Send + Sync {
    /// Returns the raw stored text for a key, if any.
    fn read_raw(&self, key: &str) -> StoreResult<Option<String>>;

    /// Overwrites the stored text for a key.
    fn write_raw(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> StoreResult<()>;
}

/// Typed, failure-tolerant view over a [`KeyValueStore`].
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

impl Storage {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self { backend: Arc::new(backend) }
    }

    /// In-memory storage, empty.
    pub fn memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// File-backed storage rooted at `dir`.
    pub fn files(dir: impl Into<PathBuf>) -> Self {
        Self::new(JsonFileStore::new(dir))
    }

    /// Serializes `value` and writes it under `key`, logging on failure.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_save(key, value) {
            warn!("Failed to persist '{}': {}", key, e);
        }
    }

    /// Like [`Storage::save`] but reports the error.
    pub fn try_save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string(value)?;
        self.backend.write_raw(key, &json)?;
        debug!("Persisted '{}' ({} bytes)", key, json.len());
        Ok(())
    }

    /// Reads and deserializes `key`. Missing or corrupt data yields `None`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_load(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Ignoring stored '{}': {}", key, e);
                None
            }
        }
    }

    /// Reads `key` as an untyped JSON value.
    pub fn load_value(&self, key: &str) -> Option<Value> {
        self.load(key)
    }

    /// Reads `key`, defaulting when missing or corrupt.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.load(key).unwrap_or_default()
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        let Some(raw) = self.backend.read_raw(key)? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::StorageCorruption { key: key.to_string(), reason: e.to_string() })
    }

    /// Deletes `key`, logging on failure.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.delete(key) {
            warn!("Failed to remove '{}': {}", key, e);
        }
    }
}

/// Volatile in-memory backend.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> StoreResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Io(std::io::Error::other("memory store lock poisoned")))
    }
}

impl KeyValueStore for MemoryStore {
    fn read_raw(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn write_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::invalid(format!("storage key '{}' is not a plain name", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for JsonFileStore {
    fn read_raw(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(path, value)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: u64,
        label: String,
    }

    #[test]
    fn test_round_trip_memory() {
        let storage = Storage::memory();
        let value = json!({"a": [1, 2, 3], "b": null, "c": "text"});
        storage.save("blob", &value);
        assert_eq!(storage.load_value("blob"), Some(value));
    }

    #[test]
    fn test_round_trip_typed() {
        let storage = Storage::memory();
        let entries = vec![Entry { id: 1, label: "one".into() }];
        storage.save(keys::WISHLIST, &entries);

        let loaded: Option<Vec<Entry>> = storage.load(keys::WISHLIST);
        assert_eq!(loaded, Some(entries));
    }

    #[test]
    fn test_missing_key_is_none() {
        let storage = Storage::memory();
        assert!(storage.load_value("never-written").is_none());
        let list: Vec<Entry> = storage.load_or_default("never-written");
        assert!(list.is_empty());
    }

    #[test]
    fn test_corrupt_value_is_none() {
        let backend = MemoryStore::new();
        backend.write_raw("comparison", "{not json").unwrap();
        let storage = Storage::new(backend);

        let loaded: Option<Vec<Entry>> = storage.load("comparison");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_shape_mismatch_is_none() {
        let storage = Storage::memory();
        storage.save("wishlist", &json!({"not": "a list"}));
        let loaded: Option<Vec<Entry>> = storage.load("wishlist");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_overwrite_and_remove() {
        let storage = Storage::memory();
        storage.save("k", &json!(1));
        storage.save("k", &json!(2));
        assert_eq!(storage.load_value("k"), Some(json!(2)));

        storage.remove("k");
        assert!(storage.load_value("k").is_none());

        // Removing again is fine
        storage.remove("k");
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::files(dir.path().join("nested"));

        storage.save(keys::RECENT_SEARCHES, &vec!["shoes", "red"]);
        let loaded: Option<Vec<String>> = storage.load(keys::RECENT_SEARCHES);
        assert_eq!(loaded, Some(vec!["shoes".to_string(), "red".to_string()]));
        assert!(dir.path().join("nested").join("recentSearches.json").exists());
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("wishlist.json"), "]]garbage").unwrap();

        let storage = Storage::files(dir.path());
        let loaded: Option<Vec<Entry>> = storage.load(keys::WISHLIST);
        assert!(loaded.is_none());
    }

    #[test]
    fn test_file_store_remove_missing() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.delete("absent").is_ok());
        assert_eq!(store.dir(), dir.path());
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.write_raw("../escape", "1").is_err());
        assert!(store.read_raw("").is_err());
    }

    #[test]
    fn test_save_failure_does_not_panic() {
        let storage = Storage::files("/proc/definitely/not/writable");
        storage.save("cart", &json!([]));
        assert!(storage.try_save("cart", &json!([])).is_err());
    }
}
