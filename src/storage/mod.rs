//! Keyed persistence backends for the wallpaper cache.
//!
//! Provides the [`Storage`] trait and implementations:
//! - [`FileStorage`] - JSON file under the user config directory
//! - [`MemoryStorage`] - In-memory (default, and for testing)

mod file;
mod memory;

use async_trait::async_trait;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;

/// Trait for keyed string storage backends.
///
/// The wallpaper client persists its URL cache through this trait rather
/// than touching any ambient global state, so tests can inject
/// [`MemoryStorage`] and applications can supply their own backend.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Load the value stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Check whether a value exists under `key`.
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Name of this storage backend.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Blanket impl for `Arc<T>`.
#[async_trait]
impl<T: Storage + ?Sized> Storage for std::sync::Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }
    async fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key).await
    }
    async fn exists(&self, key: &str) -> Result<bool> {
        (**self).exists(key).await
    }
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Blanket impl for `Box<T>`.
#[async_trait]
impl<T: Storage + ?Sized> Storage for Box<T> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }
    async fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key).await
    }
    async fn exists(&self, key: &str) -> Result<bool> {
        (**self).exists(key).await
    }
    fn name(&self) -> &str {
        (**self).name()
    }
}
