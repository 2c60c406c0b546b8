//! Content-addressed, sharded on-disk cache for remote recipe images.
//!
//! Remote hosts serve preview images through URL templates carrying a
//! `<format>` placeholder. The cache resolves the template, derives a
//! deterministic content key from the resolved URL, and mirrors the bytes
//! under `root/{key[0..2]}/{key[2..4]}/{key}_{format}.{ext}` so per-directory
//! fan-out stays bounded no matter how many images accumulate.

mod cache;
mod location;

pub use cache::{ImageCache, ImageReference};
pub use location::{FORMAT_PLACEHOLDER, ImageLocation, PUBLIC_IMAGE_PREFIX};
