//! In-memory storage.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::Storage;
use crate::error::Result;

/// In-memory storage. The default backend, and the fake to inject in tests.
///
/// Values live for the process lifetime only, which matches a
/// cache-for-session reading of the wallpaper cache.
pub struct MemoryStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty in-memory storage.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.write().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.values.read().await.contains_key(key))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new();

        assert!(storage.get("bingWallpaperList").await.unwrap().is_none());
        assert!(!storage.exists("bingWallpaperList").await.unwrap());

        storage
            .set("bingWallpaperList", r#"["https://a/1.jpg"]"#)
            .await
            .unwrap();

        assert!(storage.exists("bingWallpaperList").await.unwrap());
        let value = storage.get("bingWallpaperList").await.unwrap().unwrap();
        assert_eq!(value, r#"["https://a/1.jpg"]"#);

        storage.remove("bingWallpaperList").await.unwrap();
        assert!(!storage.exists("bingWallpaperList").await.unwrap());
    }
}
