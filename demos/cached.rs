//! Cache-backed selection with a durable file store.
//!
//! The first call populates the cache with one archive batch; every later
//! call (including across runs) picks from the persisted list without
//! touching the network.

use std::sync::Arc;

use wallpaper_archive::{FileStorage, Result, WallpaperClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("wallpaper_archive=debug")
        .init();

    let storage = Arc::new(FileStorage::default_path()?);
    let client = WallpaperClient::builder().storage(storage).build()?;

    for _ in 0..3 {
        match client.wallpaper_from_cache().await {
            Some(url) => println!("{}", url),
            None => println!("No wallpaper available"),
        }
    }

    Ok(())
}
