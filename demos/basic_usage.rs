//! Basic usage: fetch one wallpaper URL and print it.

use wallpaper_archive::{Result, WallpaperClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("wallpaper_archive=info")
        .init();

    let client = WallpaperClient::builder().build()?;

    match client.single_wallpaper().await {
        Some(url) => println!("Wallpaper: {}", url),
        None => println!("No wallpaper available"),
    }

    Ok(())
}
