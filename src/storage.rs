//! Session persistence
//!
//! The session store writes its credential and user record through to a
//! key/value store so a restarted client can resume its session. Two keys are
//! used: `token` holds the raw credential, `user` holds the serialized user
//! record.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Storage key for the session credential
pub const TOKEN_KEY: &str = "token";

/// Storage key for the serialized user record
pub const USER_KEY: &str = "user";

/// Synchronous string key/value store for session state.
///
/// Implementations must make `set` and `remove` immediately visible to a
/// following `get`.
pub trait SessionStorage: Send + Sync {
    /// Get a value, absent if the key was never set or was removed
    fn get(&self, key: &str) -> Option<String>;

    /// Set a value
    fn set(&self, key: &str, value: &str);

    /// Remove a value. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

/// In-memory storage, used in tests and for ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }
}

impl MemoryStorage {
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// File-backed storage holding all keys in one JSON document.
///
/// Writes go to disk on every `set`/`remove`. A missing or unreadable file
/// reads as empty.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: Mutex<HashMap<String, String>>,
}

impl FileStorage {
    /// Open storage at an explicit path, loading any existing content
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), %err, "discarding unreadable session file");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    /// Open storage at the default location under the user's config directory
    pub fn open_default() -> Self {
        let mut path = dirs::config_dir().unwrap_or_else(std::env::temp_dir);
        path.push("eventhub");
        path.push("session.json");
        Self::open(path)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn flush(&self, values: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                tracing::warn!(%err, "failed to create session storage directory");
                return;
            }
        }
        match serde_json::to_string_pretty(values) {
            Ok(contents) => {
                if let Err(err) = std::fs::write(&self.path, contents) {
                    tracing::warn!(path = %self.path.display(), %err, "failed to persist session");
                }
            }
            Err(err) => tracing::warn!(%err, "failed to serialize session"),
        }
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self.lock();
        values.insert(key.to_string(), value.to_string());
        self.flush(&values);
    }

    fn remove(&self, key: &str) {
        let mut values = self.lock();
        if values.remove(key).is_some() {
            self.flush(&values);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_set_get() {
        let storage = MemoryStorage::new();
        assert!(storage.get(TOKEN_KEY).is_none());
        storage.set(TOKEN_KEY, "T1");
        assert_eq!(storage.get(TOKEN_KEY), Some("T1".to_string()));
    }

    #[test]
    fn test_memory_storage_remove_is_idempotent() {
        let storage = MemoryStorage::new();
        storage.set(USER_KEY, "{}");
        storage.remove(USER_KEY);
        storage.remove(USER_KEY);
        assert!(storage.get(USER_KEY).is_none());
    }

    #[test]
    fn test_file_storage_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let storage = FileStorage::open(&path);
        storage.set(TOKEN_KEY, "T1");
        storage.set(USER_KEY, r#"{"id":1}"#);
        drop(storage);

        let reopened = FileStorage::open(&path);
        assert_eq!(reopened.get(TOKEN_KEY), Some("T1".to_string()));
        assert_eq!(reopened.get(USER_KEY), Some(r#"{"id":1}"#.to_string()));
    }

    #[test]
    fn test_file_storage_corrupt_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = FileStorage::open(&path);
        assert!(storage.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn test_file_storage_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let storage = FileStorage::open(&path);
        storage.set(TOKEN_KEY, "T1");
        storage.remove(TOKEN_KEY);
        drop(storage);

        let reopened = FileStorage::open(&path);
        assert!(reopened.get(TOKEN_KEY).is_none());
    }
}
