//! # Ladle Core
//!
//! Core library for the Ladle recipe backend: domain records, repository
//! ports with their Postgres implementations, and the sharded on-disk
//! image cache that mirrors externally hosted recipe images.
//!
//! The image cache is the interesting part. Remote preview images are
//! addressed by a deterministic content key (the SHA-256 of the resolved
//! URL) and stored under two levels of 2-hex-character shard directories so
//! no single directory ever accumulates more than a sliver of the corpus.

pub mod database;
pub mod error;
pub mod image;
pub mod recommend;
pub mod types;

pub use error::{LadleError, Result};
pub use image::{ImageCache, ImageLocation, ImageReference};
pub use recommend::RecommendationBuffer;
