//! Key-value persistence for executive data, history and preferences.

pub mod sqlite;

use anyhow::Result;
use dashmap::{DashMap, DashSet};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

pub use sqlite::SqliteKvStore;

/// JSON values stored under string keys.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&self, key: &str, value: &Value) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
}

/// Read a key and decode it. Values of the wrong shape read as `None`.
pub fn get_as<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(value) => match serde_json::from_value(value) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(e) => {
                tracing::warn!("Ignoring malformed value for key '{}': {}", key, e);
                Ok(None)
            }
        },
        None => Ok(None),
    }
}

pub fn set_as<T: Serialize>(store: &dyn KvStore, key: &str, value: &T) -> Result<()> {
    store.set(key, &serde_json::to_value(value)?)
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: DashMap<String, Value>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        self.entries.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Uses the SQLite store when available and the memory store otherwise,
/// including after any individual primary failure. Never returns an error.
pub struct FallbackKvStore {
    primary: Option<Box<dyn KvStore>>,
    fallback: MemoryKvStore,
    /// Keys whose primary delete failed; reads treat them as absent
    tombstones: DashSet<String>,
}

impl FallbackKvStore {
    pub fn new(primary: Option<SqliteKvStore>) -> Self {
        Self::from_primary(primary.map(|p| Box::new(p) as Box<dyn KvStore>))
    }

    pub fn with_primary(primary: impl KvStore + 'static) -> Self {
        Self::from_primary(Some(Box::new(primary)))
    }

    fn from_primary(primary: Option<Box<dyn KvStore>>) -> Self {
        Self {
            primary,
            fallback: MemoryKvStore::new(),
            tombstones: DashSet::new(),
        }
    }

    /// Open the database at `path`, falling back to memory-only when it cannot be opened.
    pub fn open(path: &Path) -> Self {
        match SqliteKvStore::open(path) {
            Ok(store) => {
                tracing::info!("Key-value store opened at {:?}", path);
                Self::new(Some(store))
            }
            Err(e) => {
                tracing::warn!("Key-value store unavailable ({}), using memory store", e);
                Self::new(None)
            }
        }
    }

    pub fn memory_only() -> Self {
        Self::new(None)
    }

    pub fn is_persistent(&self) -> bool {
        self.primary.is_some()
    }
}

impl KvStore for FallbackKvStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        if self.tombstones.contains(key) {
            return Ok(None);
        }
        if let Some(primary) = &self.primary {
            match primary.get(key) {
                Ok(value) => return Ok(value),
                Err(e) => tracing::warn!("Primary get('{}') failed: {}", key, e),
            }
        }
        Ok(self.fallback.get(key).unwrap_or(None))
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        self.tombstones.remove(key);
        if let Some(primary) = &self.primary {
            match primary.set(key, value) {
                Ok(()) => return Ok(()),
                Err(e) => tracing::warn!("Primary set('{}') failed: {}", key, e),
            }
        }
        self.fallback.set(key, value).ok();
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        if let Some(primary) = &self.primary {
            if let Err(e) = primary.delete(key) {
                tracing::warn!("Primary delete('{}') failed: {}", key, e);
                self.tombstones.insert(key.to_string());
            }
        }
        self.fallback.delete(key).ok();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Pref {
        theme: String,
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryKvStore::new();
        store.set("k", &json!(1)).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(json!(1)));
        store.delete("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_typed_helpers() {
        let store = MemoryKvStore::new();
        set_as(&store, "pref", &Pref { theme: "dark".into() }).unwrap();
        let pref: Option<Pref> = get_as(&store, "pref").unwrap();
        assert_eq!(pref, Some(Pref { theme: "dark".into() }));

        store.set("pref", &json!(42)).unwrap();
        let malformed: Option<Pref> = get_as(&store, "pref").unwrap();
        assert_eq!(malformed, None);
    }

    #[test]
    fn test_fallback_without_primary() {
        let store = FallbackKvStore::memory_only();
        assert!(!store.is_persistent());
        store.set("a", &json!("x")).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(json!("x")));
        store.delete("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    /// Memory store whose deletes fail while `failing` is set.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryKvStore,
        failing: std::sync::atomic::AtomicBool,
    }

    impl KvStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<Value>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &Value) -> Result<()> {
            self.inner.set(key, value)
        }

        fn delete(&self, key: &str) -> Result<()> {
            if self.failing.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(anyhow::anyhow!("disk I/O error"));
            }
            self.inner.delete(key)
        }
    }

    #[test]
    fn test_failed_primary_delete_hides_stale_value() {
        let primary = FlakyStore::default();
        primary.failing.store(true, std::sync::atomic::Ordering::SeqCst);
        let store = FallbackKvStore::with_primary(primary);

        store.set("ejecutivo", &json!({"cedula": "1"})).unwrap();
        store.delete("ejecutivo").unwrap();
        assert_eq!(store.get("ejecutivo").unwrap(), None);

        store.set("ejecutivo", &json!({"cedula": "2"})).unwrap();
        assert_eq!(store.get("ejecutivo").unwrap(), Some(json!({"cedula": "2"})));
    }

    #[test]
    fn test_fallback_with_primary() {
        let store = FallbackKvStore::new(Some(SqliteKvStore::in_memory().unwrap()));
        assert!(store.is_persistent());
        store.set("a", &json!([1, 2])).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(json!([1, 2])));
    }
}
