//! Typed records exchanged with the image archive.

pub mod archive;

pub use archive::{ArchiveResponse, WallpaperRecord};
