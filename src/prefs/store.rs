//! Key-value backends for persisted preferences.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::PrefsError;

/// A string key-value store that survives across sessions.
pub trait KeyValueStore: Send + Debug {
    /// Read a value. Absent keys return `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError>;
}

/// Volatile store, used with `--no-persist` and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object file.
///
/// The whole file is loaded on open and rewritten on every `set`. A missing
/// or unreadable file starts out empty.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Default location: `<config dir>/gatus-tui/preferences.json`.
    pub fn default_path() -> Result<PathBuf, PrefsError> {
        let dir = dirs::config_dir().ok_or(PrefsError::NoConfigDir)?;
        Ok(dir.join("gatus-tui").join("preferences.json"))
    }

    /// Open the store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match Self::load(&path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %path.display(), "ignoring unreadable preferences: {}", e);
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<BTreeMap<String, String>, PrefsError> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path)?;
        // Non-string values are dropped rather than failing the whole file.
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(&content)?;
        Ok(raw
            .into_iter()
            .filter_map(|(k, v)| match v {
                serde_json::Value::String(s) => Some((k, s)),
                _ => None,
            })
            .collect())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::with_entries([("a", "1")]);
        assert_eq!(store.get("a").as_deref(), Some("1"));
        assert!(store.get("b").is_none());

        store.set("b", "2").unwrap();
        assert_eq!(store.get("b").as_deref(), Some("2"));
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        let mut store = FileStore::open(&path);
        assert!(store.get("gatus-minimal:theme").is_none());
        store.set("gatus-minimal:theme", "tui").unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("gatus-minimal:theme").as_deref(), Some("tui"));
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn test_file_store_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = FileStore::open(&path);
        assert!(store.get("gatus-minimal:theme").is_none());

        // Writing replaces the corrupt file
        store.set("gatus-minimal:color-mode", "dark").unwrap();
        assert_eq!(
            FileStore::open(&path).get("gatus-minimal:color-mode").as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn test_file_store_skips_non_string_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{"gatus-minimal:theme": 3, "gatus-minimal:color-mode": "light"}"#)
            .unwrap();

        let store = FileStore::open(&path);
        assert!(store.get("gatus-minimal:theme").is_none());
        assert_eq!(store.get("gatus-minimal:color-mode").as_deref(), Some("light"));
    }
}
