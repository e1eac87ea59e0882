//! Wire types returned by the daily-wallpaper archive.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One wallpaper entry from the archive.
///
/// Immutable once received; only the derived absolute URL is ever persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallpaperRecord {
    /// First day the image was shown, as `YYYYMMDD`.
    #[serde(default)]
    pub startdate: String,
    /// Last day the image was shown, as `YYYYMMDD`.
    #[serde(default)]
    pub enddate: String,
    /// Image path relative to the archive host.
    pub url: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Copyright text.
    #[serde(default)]
    pub copyright: String,
}

impl WallpaperRecord {
    /// First display day, if the archive date string parses.
    pub fn start_date(&self) -> Option<NaiveDate> {
        parse_archive_date(&self.startdate)
    }

    /// Last display day, if the archive date string parses.
    pub fn end_date(&self) -> Option<NaiveDate> {
        parse_archive_date(&self.enddate)
    }

    /// Browser-loadable URL: the relative path prefixed with the archive host.
    pub fn absolute_url(&self, base: &str) -> String {
        let base = base.trim_end_matches('/');
        if self.url.starts_with('/') {
            format!("{}{}", base, self.url)
        } else {
            format!("{}/{}", base, self.url)
        }
    }
}

fn parse_archive_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y%m%d").ok()
}

/// Response body of the archive endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveResponse {
    /// Wallpaper entries, most recent first.
    pub images: Vec<WallpaperRecord>,
    /// UI strings the archive ships alongside the images; not consumed here.
    #[serde(default)]
    pub tooltips: serde_json::Value,
}
