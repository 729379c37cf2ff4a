//! Persistence port for the history store. The core only ever asks for
//! "get/set/delete a byte blob by key"; storage mechanics live behind
//! this trait and are injected at construction, never reached for as
//! ambient global state.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::RwLock;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;
    async fn delete(&self, key: &str) -> Result<()>;
}

/// In-memory store, used by tests and ephemeral hosts.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// File-backed store: one file per key under a root directory.
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        fs::write(self.path_for(key), value).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("missing").await.unwrap().is_none());

        store.set("k", b"value".to_vec()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap().unwrap(), b"value");

        store.delete("k").await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());
        // Deleting again is a no-op.
        store.delete("k").await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let root = std::env::temp_dir().join(format!("quizforge_kv_{}", uuid::Uuid::new_v4()));
        let store = JsonFileStore::new(&root);

        assert!(store.get("history").await.unwrap().is_none());
        store.set("history", b"{}".to_vec()).await.unwrap();
        assert_eq!(store.get("history").await.unwrap().unwrap(), b"{}");

        store.delete("history").await.unwrap();
        assert!(store.get("history").await.unwrap().is_none());
        store.delete("history").await.unwrap();

        let _ = tokio::fs::remove_dir_all(&root).await;
    }
}
