//! Fetching missing card images into the local cache
//!
//! The sheet renderer only ever reads the cache; this crate is the one
//! place that writes to it.

mod fetch;
mod scryfall;
mod types;

pub use fetch::{FetchOptions, fetch_missing_images, fetch_missing_images_blocking};
pub use scryfall::{ImageVersion, SCRYFALL_API, ScryfallSource};
pub use types::*;

/// Something that can produce image bytes for a card name
pub trait ImageSource {
    fn fetch(&self, name: &str) -> Result<Vec<u8>>;
}
