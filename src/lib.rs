//! # wallpaper-archive
//!
//! Rust client library for the Bing daily-wallpaper image archive
//! (`HPImageArchive.aspx`).
//!
//! Fetches wallpaper metadata, derives browser-loadable image URLs, and
//! keeps a persisted cache of recent URLs so repeat lookups stay off the
//! network. Both high-level operations return `Option<String>`: `None`
//! means "no wallpaper available", never an error for the caller to handle.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wallpaper_archive::WallpaperClient;
//!
//! #[tokio::main]
//! async fn main() -> wallpaper_archive::Result<()> {
//!     let client = WallpaperClient::builder().build()?;
//!
//!     // Straight from the archive: one record at a random recent day
//!     if let Some(url) = client.single_wallpaper().await {
//!         println!("{url}");
//!     }
//!
//!     // Cache-backed: one archive call populates eight entries, then
//!     // every later call picks from the persisted list
//!     if let Some(url) = client.wallpaper_from_cache().await {
//!         println!("{url}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Storage
//!
//! The URL cache persists through the [`Storage`] trait. [`MemoryStorage`]
//! (the default) lives for the process; [`FileStorage`] survives restarts.
//! Inject your own backend through the builder to integrate with an
//! application's settings store.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod transport;

// Re-exports for ergonomic usage
pub use api::archive::{ArchiveQuery, random_day_offset};
pub use client::{WallpaperClient, WallpaperClientBuilder};
pub use error::{Error, Result};
pub use models::archive::{ArchiveResponse, WallpaperRecord};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use transport::http::{HttpClient, RequestOptions};
