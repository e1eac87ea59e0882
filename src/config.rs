//! Configuration constants and URL construction for the image archive.

use std::time::Duration;

use url::Url;

use crate::error::Error;

/// Default archive host. Image paths returned by the archive are relative
/// to this host.
pub const DEFAULT_BASE_URL: &str = "https://www.bing.com";

/// Default market the wallpapers are localized for.
pub const DEFAULT_MARKET: &str = "zh-CN";

/// Path of the daily-wallpaper archive endpoint.
pub const ARCHIVE_PATH: &str = "/HPImageArchive.aspx";

/// Response format requested from the archive (`js` = JSON).
pub const ARCHIVE_FORMAT: &str = "js";

/// Default overall timeout for a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Connect timeout for the underlying HTTP client.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Storage key the cached URL list is persisted under.
pub const CACHE_KEY: &str = "bingWallpaperList";

/// Number of records fetched when populating the cache.
pub const CACHE_FILL_COUNT: u8 = 8;

/// Exclusive upper bound for the random recency offset, in days.
/// The archive serves `idx` values in `[0, 8)`, 0 being today.
pub const MAX_DAY_OFFSET: u8 = 8;

/// Returns the archive endpoint URL for the given base host.
pub fn archive_url(base: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), ARCHIVE_PATH)
}

/// Validate that a string is an absolute http(s) URL.
pub(crate) fn validate_base_url(value: &str) -> Result<Url, Error> {
    let url = Url::parse(value)
        .map_err(|e| Error::Config(format!("invalid base URL '{}': {}", value, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::Config(format!(
            "invalid base URL '{}': unsupported scheme '{}'",
            value, other
        ))),
    }
}
