//! Local key/value persistence.
//!
//! Every value is stored JSON-encoded under a logical key, and the whole map
//! is written to a single `storage.json` file. Reading never fails: a missing
//! file, a corrupt file or a corrupt entry yields the caller's default and a
//! `tracing` warning.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use super::error::{AppError, Result};

pub struct KvStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl KvStore {
    /// Open the store at the platform data directory.
    pub fn open_default() -> Self {
        Self::open(Self::default_path())
    }

    /// Open the store backed by `path`. Unreadable contents start an empty map.
    pub fn open(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match parse_entries(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Failed to parse storage: {}. Using defaults.", e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to read storage: {}. Using defaults.", e);
                BTreeMap::new()
            }
        };

        Self {
            path: Some(path),
            entries,
        }
    }

    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: BTreeMap::new(),
        }
    }

    /// Get storage file path (cross-platform)
    pub fn default_path() -> PathBuf {
        let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("ferrispen");
        path.push("storage.json");
        path
    }

    /// Decode the value stored under `key`, or `None` if it is absent or malformed.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.entries.get(key)?;
        match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, "Malformed storage entry: {}. Using default.", e);
                None
            }
        }
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Store `value` under `key` and flush the whole map to disk.
    ///
    /// The in-memory entry is updated even when the flush fails.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let encoded = serde_json::to_string(value)?;
        self.entries.insert(key.to_string(), encoded);
        self.flush()
    }

    fn flush(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Parse the on-disk map. Entries whose value is not a string are dropped.
fn parse_entries(contents: &str) -> Result<BTreeMap<String, String>> {
    let raw: serde_json::Value = serde_json::from_str(contents)?;
    let serde_json::Value::Object(map) = raw else {
        return Err(AppError::Storage("storage root is not an object".to_string()));
    };

    let mut entries = BTreeMap::new();
    for (key, value) in map {
        match value {
            serde_json::Value::String(s) => {
                entries.insert(key, s);
            }
            other => {
                tracing::warn!(key = %key, "Ignoring non-string storage entry: {}", other);
            }
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> KvStore {
        KvStore::open(dir.path().join("storage.json"))
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get::<String>("code-editor-html"), None);
        assert!(store.get_or("code-editor-autorun", true));
    }

    #[test]
    fn test_set_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = store_in(&dir);
            store.set("code-editor-html", "<p>hi</p>").unwrap();
            store.set("code-editor-autorun", &false).unwrap();
        }
        let store = store_in(&dir);
        assert_eq!(store.get::<String>("code-editor-html").as_deref(), Some("<p>hi</p>"));
        assert_eq!(store.get::<bool>("code-editor-autorun"), Some(false));
    }

    #[test]
    fn test_values_are_json_encoded() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set("code-editor-theme", "light").unwrap();

        let on_disk = fs::read_to_string(dir.path().join("storage.json")).unwrap();
        let map: BTreeMap<String, String> = serde_json::from_str(&on_disk).unwrap();
        assert_eq!(map["code-editor-theme"], "\"light\"");
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("storage.json"), "{ definitely not json").unwrap();
        let store = store_in(&dir);
        assert_eq!(store.get_or("code-editor-css", String::from("default")), "default");
    }

    #[test]
    fn test_malformed_entry_falls_back() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("storage.json"),
            r#"{"code-editor-autorun": "not-a-bool", "code-editor-js": "\"ok\"", "stray": 42}"#,
        )
        .unwrap();
        let store = store_in(&dir);
        assert!(store.get_or("code-editor-autorun", true));
        assert_eq!(store.get::<String>("code-editor-js").as_deref(), Some("ok"));
        assert!(!store.entries.contains_key("stray"));
    }

    #[test]
    fn test_root_must_be_object() {
        assert!(matches!(parse_entries("[1, 2]"), Err(AppError::Storage(_))));
    }

    #[test]
    fn test_in_memory_never_writes() {
        let mut store = KvStore::in_memory();
        store.set("k", &1u32).unwrap();
        assert_eq!(store.get::<u32>("k"), Some(1));
        assert!(store.path.is_none());
    }
}
