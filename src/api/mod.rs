//! Typed archive endpoint calls.

pub mod archive;

pub use archive::{fetch_archive, random_day_offset, ArchiveQuery};
