//! Local key/value persistence for client state.
//!
//! The browser build of this storefront kept its state in localStorage; this
//! module is the equivalent for a native client. Writes are synchronous and
//! happen on the event thread immediately after each mutation, so there is no
//! concurrency hazard to manage.
//!
//! Storage is not safety-critical state: every failure here is absorbed and
//! logged, never surfaced to the caller. A broken store degrades to "fresh
//! empty cart" and "anonymous session".

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

/// Fixed storage keys.
pub mod keys {
    /// Key for the serialized cart snapshot.
    pub const CART: &str = "cart";

    /// Key for the bearer credential.
    pub const TOKEN: &str = "token";
}

/// Key/value store for persisted client state.
///
/// Implementations absorb their own failures; `get` returns `None` both for
/// missing keys and for unreadable storage, and `set`/`remove` are best-effort.
pub trait StateStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any existing value.
    fn set(&self, key: &str, value: &str);

    /// Delete the entry for `key`. Absence is a no-op.
    fn remove(&self, key: &str);
}

/// File-backed store: one file per key under a state directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    ///
    /// Directory creation failure is absorbed; subsequent writes will warn
    /// and the store behaves as empty.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            warn!(dir = %dir.display(), error = %e, "Failed to create state directory");
        }
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(key, error = %e, "Failed to read state entry");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = fs::write(self.path_for(key), value) {
            warn!(key, error = %e, "Failed to write state entry");
        }
    }

    fn remove(&self, key: &str) {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(key, error = %e, "Failed to remove state entry"),
        }
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    #[must_use]
    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            entries: Mutex::new(entries.into_iter().collect()),
        }
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|map| map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut map) = self.entries.lock() {
            map.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.entries.lock() {
            map.remove(key);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get(keys::CART), None);

        store.set(keys::CART, "[]");
        assert_eq!(store.get(keys::CART).as_deref(), Some("[]"));

        store.remove(keys::CART);
        assert_eq!(store.get(keys::CART), None);
    }

    #[test]
    fn test_memory_store_remove_missing_is_noop() {
        let store = MemoryStore::new();
        store.remove("missing");
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set(keys::TOKEN, "abc123");
        assert_eq!(store.get(keys::TOKEN).as_deref(), Some("abc123"));

        store.remove(keys::TOKEN);
        assert_eq!(store.get(keys::TOKEN), None);
    }

    #[test]
    fn test_file_store_missing_key_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("absent"), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::new(dir.path());
            store.set(keys::CART, "[{\"product_id\":\"p\",\"quantity\":1}]");
        }
        let store = FileStore::new(dir.path());
        assert!(store.get(keys::CART).unwrap().contains("product_id"));
    }
}
