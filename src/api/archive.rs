//! Daily-wallpaper archive queries.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::debug;

use crate::config;
use crate::error::Result;
use crate::models::archive::ArchiveResponse;
use crate::transport::http::{HttpClient, RequestOptions};

/// Query options for the archive endpoint.
///
/// Defaults mirror a plain page load: a random recency offset, one record,
/// the default market.
#[derive(Debug, Clone)]
pub struct ArchiveQuery {
    /// Recency offset in days from today, 0 = today.
    pub idx: u8,
    /// Number of records to return.
    pub n: u8,
    /// Market the wallpapers are localized for.
    pub market: String,
}

impl Default for ArchiveQuery {
    fn default() -> Self {
        Self {
            idx: random_day_offset(),
            n: 1,
            market: config::DEFAULT_MARKET.to_string(),
        }
    }
}

impl ArchiveQuery {
    /// Set the recency offset.
    pub fn idx(mut self, idx: u8) -> Self {
        self.idx = idx;
        self
    }

    /// Set the number of records to request.
    pub fn count(mut self, n: u8) -> Self {
        self.n = n;
        self
    }

    /// Set the market.
    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.market = market.into();
        self
    }
}

/// Random recency offset in `[0, MAX_DAY_OFFSET)` days.
pub fn random_day_offset() -> u8 {
    rand::thread_rng().gen_range(0..config::MAX_DAY_OFFSET)
}

/// Fetch wallpaper metadata from the archive.
///
/// Raises on every failure; the wallpaper client decides what to swallow.
pub async fn fetch_archive(
    http: &HttpClient,
    base_url: &str,
    query: &ArchiveQuery,
) -> Result<ArchiveResponse> {
    let url = config::archive_url(base_url);
    let mut params = BTreeMap::new();
    params.insert("format".to_string(), config::ARCHIVE_FORMAT.to_string());
    params.insert("idx".to_string(), query.idx.to_string());
    params.insert("n".to_string(), query.n.to_string());
    params.insert("mkt".to_string(), query.market.clone());

    debug!(idx = query.idx, n = query.n, market = %query.market, "Fetching archive metadata");
    http.request(&url, RequestOptions::default().params(params))
        .await
}
