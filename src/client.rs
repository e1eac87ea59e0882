//! Main client entry point.

use std::sync::Arc;

use rand::seq::SliceRandom;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::api::archive::{fetch_archive, ArchiveQuery};
use crate::config;
use crate::error::{Error, Result};
use crate::models::archive::ArchiveResponse;
use crate::storage::{MemoryStorage, Storage};
use crate::transport::http::HttpClient;

/// Client for the daily-wallpaper archive.
///
/// The two high-level operations, [`single_wallpaper`] and
/// [`wallpaper_from_cache`], never fail: any error in the chain is logged
/// and collapsed into `None`, so a missing wallpaper degrades the caller's
/// display instead of propagating.
///
/// [`single_wallpaper`]: WallpaperClient::single_wallpaper
/// [`wallpaper_from_cache`]: WallpaperClient::wallpaper_from_cache
///
/// # Examples
///
/// ```rust,no_run
/// use wallpaper_archive::WallpaperClient;
///
/// # async fn example() -> wallpaper_archive::Result<()> {
/// let client = WallpaperClient::builder().build()?;
///
/// if let Some(url) = client.wallpaper_from_cache().await {
///     println!("background: {url}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct WallpaperClient {
    http: HttpClient,
    base_url: String,
    market: String,
    cache_key: String,
    fill_count: u8,
    storage: Arc<dyn Storage>,
    /// Serializes cache population so concurrent misses share one fetch.
    populate_lock: Mutex<()>,
}

impl WallpaperClient {
    /// Create a builder for configuring the client.
    pub fn builder() -> WallpaperClientBuilder {
        WallpaperClientBuilder::new()
    }

    /// Typed archive call: full metadata for integrators that want titles,
    /// copyright text, or dates rather than a bare URL.
    pub async fn archive(&self, query: &ArchiveQuery) -> Result<ArchiveResponse> {
        fetch_archive(&self.http, &self.base_url, query).await
    }

    /// Fetch one wallpaper at a random recency offset.
    ///
    /// Returns the absolute image URL, or `None` on any failure. `None`
    /// means "no wallpaper available", not an error to propagate.
    pub async fn single_wallpaper(&self) -> Option<String> {
        let query = ArchiveQuery::default().market(self.market.clone());
        match self.archive(&query).await {
            Ok(response) => match response.images.first() {
                Some(record) => Some(record.absolute_url(&self.base_url)),
                None => {
                    warn!("Archive returned no images");
                    None
                }
            },
            Err(e) => {
                warn!(error = %e, "Failed to fetch wallpaper");
                None
            }
        }
    }

    /// Read-through cached wallpaper selection.
    ///
    /// A populated cache is served without touching the network; a miss
    /// fetches one batch of records, persists the derived URL list, and
    /// serves from that. Concurrent misses share a single fetch.
    pub async fn wallpaper_from_cache(&self) -> Option<String> {
        let cached = self.read_cache().await;
        if !cached.is_empty() {
            return pick_random(&cached);
        }

        // Miss: serialize population, then re-check in case another caller
        // won the race while we waited.
        let _guard = self.populate_lock.lock().await;
        let cached = self.read_cache().await;
        if !cached.is_empty() {
            return pick_random(&cached);
        }

        match self.populate_cache().await {
            Ok(urls) if !urls.is_empty() => pick_random(&urls),
            Ok(_) => {
                warn!("Archive returned no images");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to populate wallpaper cache");
                None
            }
        }
    }

    /// Decode the persisted URL list. Absent, unreadable, or corrupt values
    /// all count as an empty cache.
    async fn read_cache(&self) -> Vec<String> {
        match self.storage.get(&self.cache_key).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(urls) => urls,
                Err(e) => {
                    let e = Error::CacheDecode(e.to_string());
                    warn!(error = %e, "Ignoring unreadable cache value");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Cache read failed");
                Vec::new()
            }
        }
    }

    /// Fetch one batch of records and persist the derived URL list.
    ///
    /// An empty result is never persisted, so a failed refresh leaves the
    /// cache in a miss state rather than a permanent empty one.
    async fn populate_cache(&self) -> Result<Vec<String>> {
        let query = ArchiveQuery::default()
            .count(self.fill_count)
            .market(self.market.clone());
        let response = self.archive(&query).await?;

        let urls: Vec<String> = response
            .images
            .iter()
            .map(|record| record.absolute_url(&self.base_url))
            .collect();
        if urls.is_empty() {
            return Ok(urls);
        }

        let encoded =
            serde_json::to_string(&urls).map_err(|e| Error::CacheDecode(e.to_string()))?;
        if let Err(e) = self.storage.set(&self.cache_key, &encoded).await {
            // Serve the fetched list anyway; the store just misses this round.
            warn!(error = %e, "Failed to persist wallpaper cache");
        } else {
            debug!(count = urls.len(), storage = self.storage.name(), "Wallpaper cache populated");
        }
        Ok(urls)
    }

    /// The injected storage backend.
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }
}

impl std::fmt::Debug for WallpaperClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WallpaperClient")
            .field("base_url", &self.base_url)
            .field("market", &self.market)
            .field("cache_key", &self.cache_key)
            .field("fill_count", &self.fill_count)
            .field("storage", &self.storage.name())
            .finish()
    }
}

fn pick_random(urls: &[String]) -> Option<String> {
    urls.choose(&mut rand::thread_rng()).cloned()
}

/// Builder for [`WallpaperClient`].
pub struct WallpaperClientBuilder {
    base_url: Option<String>,
    market: Option<String>,
    fill_count: Option<u8>,
    storage: Option<Arc<dyn Storage>>,
    http: Option<HttpClient>,
    relay: Option<String>,
}

impl WallpaperClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            market: None,
            fill_count: None,
            storage: None,
            http: None,
            relay: None,
        }
    }

    /// Set the archive host (also the prefix for relative image paths).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the market the wallpapers are localized for.
    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    /// Set how many records one cache population fetches.
    pub fn fill_count(mut self, count: u8) -> Self {
        self.fill_count = Some(count);
        self
    }

    /// Set the storage backend the URL cache persists through.
    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Set a custom HTTP client.
    pub fn http_client(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Route archive requests through a CORS relay endpoint.
    pub fn relay(mut self, relay: impl Into<String>) -> Self {
        self.relay = Some(relay.into());
        self
    }

    /// Build the client, validating the configured URLs.
    pub fn build(self) -> Result<WallpaperClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| config::DEFAULT_BASE_URL.to_string());
        config::validate_base_url(&base_url)?;

        let mut http = self.http.unwrap_or_default();
        if let Some(relay) = self.relay {
            config::validate_base_url(&relay)?;
            http = http.with_relay(relay);
        }

        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(MemoryStorage::new()));

        let client = WallpaperClient {
            http,
            base_url,
            market: self
                .market
                .unwrap_or_else(|| config::DEFAULT_MARKET.to_string()),
            cache_key: config::CACHE_KEY.to_string(),
            fill_count: self.fill_count.unwrap_or(config::CACHE_FILL_COUNT),
            storage,
            populate_lock: Mutex::new(()),
        };
        info!(base_url = %client.base_url, storage = client.storage.name(), "WallpaperClient initialized");
        Ok(client)
    }
}

impl Default for WallpaperClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_random() {
        assert!(pick_random(&[]).is_none());

        let one = vec!["https://a/1.jpg".to_string()];
        assert_eq!(pick_random(&one).as_deref(), Some("https://a/1.jpg"));

        let many: Vec<String> = (0..8).map(|i| format!("https://a/{i}.jpg")).collect();
        for _ in 0..20 {
            let picked = pick_random(&many).unwrap();
            assert!(many.contains(&picked));
        }
    }

    #[test]
    fn test_builder_rejects_bad_base_url() {
        assert!(WallpaperClient::builder()
            .base_url("not a url")
            .build()
            .is_err());
    }

    #[test]
    fn test_builder_defaults() {
        let client = WallpaperClient::builder().build().unwrap();
        assert_eq!(client.base_url, config::DEFAULT_BASE_URL);
        assert_eq!(client.market, config::DEFAULT_MARKET);
        assert_eq!(client.fill_count, config::CACHE_FILL_COUNT);
        assert_eq!(client.cache_key, config::CACHE_KEY);
        assert_eq!(client.storage.name(), "memory");
    }
}
