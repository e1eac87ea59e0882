//! File-based storage.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

use super::Storage;
use crate::error::{Error, Result};

/// File-based storage: one JSON object per file, key to value.
///
/// The durable analogue of browser local storage.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create storage at the specified path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create storage at the default path:
    /// `~/.config/wallpaper-archive/store.json`
    pub fn default_path() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Cannot determine config directory".into()))?;
        let path = config_dir.join("wallpaper-archive").join("store.json");
        Ok(Self::new(path))
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::storage_io(&self.path, e.to_string()))?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&content).map_err(|e| Error::StorageSerialization(e.to_string()))
    }

    fn write_all(&self, data: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::storage_io(parent, e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(data)
            .map_err(|e| Error::StorageSerialization(e.to_string()))?;
        std::fs::write(&self.path, &content)
            .map_err(|e| Error::storage_io(&self.path, e.to_string()))?;

        debug!(path = %self.path.display(), "Store written");
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let data = self.read_all()?;
        Ok(data.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut data = self.read_all()?;
        data.insert(key.to_string(), value.to_string());
        self.write_all(&data)
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut data = self.read_all()?;
        data.remove(key);
        self.write_all(&data)
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("store.json"));

        assert!(storage.get("bingWallpaperList").await.unwrap().is_none());

        storage
            .set("bingWallpaperList", r#"["https://a/1.jpg","https://a/2.jpg"]"#)
            .await
            .unwrap();
        let value = storage.get("bingWallpaperList").await.unwrap().unwrap();
        assert_eq!(value, r#"["https://a/1.jpg","https://a/2.jpg"]"#);

        storage.remove("bingWallpaperList").await.unwrap();
        assert!(storage.get("bingWallpaperList").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_parent_dirs_created() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("deep").join("store.json"));
        storage.set("k", "v").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap().unwrap(), "v");
    }

    #[tokio::test]
    async fn test_empty_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "").unwrap();

        let storage = FileStorage::new(&path);
        assert!(storage.get("k").await.unwrap().is_none());
    }
}
