//! Key-value storage
//!
//! The client persists two strings (bearer token and theme) in a durable
//! key-value store. Browsers provide `localStorage`; native hosts use
//! [`FileStore`]; tests use [`MemoryStore`].

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::ClientResult;

/// Key under which the bearer token is stored
pub const TOKEN_KEY: &str = "token";

/// Key under which the display theme is stored
pub const THEME_KEY: &str = "theme";

/// Durable string store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> ClientResult<()>;

    fn remove(&self, key: &str) -> ClientResult<()>;
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RefCell::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(feature = "native")]
pub use file::FileStore;

#[cfg(feature = "native")]
mod file {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    use super::KeyValueStore;
    use crate::error::{ClientError, ClientResult};

    /// JSON-file backed store, rewritten on every change
    #[derive(Debug)]
    pub struct FileStore {
        path: PathBuf,
        entries: RefCell<HashMap<String, String>>,
    }

    impl FileStore {
        /// Open (or start) a store at `path`. A missing file is an empty store.
        pub fn open(path: impl Into<PathBuf>) -> ClientResult<Self> {
            let path = path.into();
            let entries = match std::fs::read_to_string(&path) {
                Ok(content) if content.trim().is_empty() => HashMap::new(),
                Ok(content) => serde_json::from_str(&content)
                    .map_err(|e| ClientError::Storage(format!("{}: {}", path.display(), e)))?,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
                Err(e) => {
                    return Err(ClientError::Storage(format!("{}: {}", path.display(), e)));
                }
            };

            Ok(Self {
                path,
                entries: RefCell::new(entries),
            })
        }

        /// Store under the platform data directory
        pub fn open_default() -> ClientResult<Self> {
            let dir = dirs::data_local_dir()
                .map(|p| p.join("dsa-tracker"))
                .unwrap_or_else(|| PathBuf::from("./dsa_tracker_data"));
            Self::open(dir.join("storage.json"))
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn persist(&self, entries: &HashMap<String, String>) -> ClientResult<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ClientError::Storage(e.to_string()))?;
            }
            let content = serde_json::to_string_pretty(entries)
                .map_err(|e| ClientError::Storage(e.to_string()))?;
            std::fs::write(&self.path, content).map_err(|e| ClientError::Storage(e.to_string()))
        }

        /// Apply `change` to a copy, write it, and keep it only once on disk
        fn commit(&self, change: impl FnOnce(&mut HashMap<String, String>)) -> ClientResult<()> {
            let mut next = self.entries.borrow().clone();
            change(&mut next);
            self.persist(&next)?;
            *self.entries.borrow_mut() = next;
            Ok(())
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> ClientResult<()> {
            self.commit(|entries| {
                entries.insert(key.to_string(), value.to_string());
            })
        }

        fn remove(&self, key: &str) -> ClientResult<()> {
            if !self.entries.borrow().contains_key(key) {
                return Ok(());
            }
            self.commit(|entries| {
                entries.remove(key);
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.get(TOKEN_KEY), None);

        store.set(TOKEN_KEY, "abc").unwrap();
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));

        store.remove(TOKEN_KEY).unwrap();
        assert_eq!(store.get(TOKEN_KEY), None);
        assert!(store.is_empty());
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        {
            let store = FileStore::open(&path).unwrap();
            store.set(TOKEN_KEY, "tok-1").unwrap();
            store.set(THEME_KEY, "dark").unwrap();
        }

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok-1"));
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));

        store.remove(TOKEN_KEY).unwrap();
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(TOKEN_KEY), None);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_store_failed_write_keeps_memory() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        let store = FileStore::open(sub.join("storage.json")).unwrap();
        store.set(TOKEN_KEY, "tok-1").unwrap();

        // A regular file where the data directory should be
        std::fs::remove_dir_all(&sub).unwrap();
        std::fs::write(&sub, "blocker").unwrap();

        assert!(matches!(
            store.set(TOKEN_KEY, "tok-2"),
            Err(crate::error::ClientError::Storage(_))
        ));
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok-1"));

        assert!(store.set(THEME_KEY, "dark").is_err());
        assert_eq!(store.get(THEME_KEY), None);

        assert!(store.remove(TOKEN_KEY).is_err());
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok-1"));
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            FileStore::open(&path),
            Err(crate::error::ClientError::Storage(_))
        ));
    }
}
