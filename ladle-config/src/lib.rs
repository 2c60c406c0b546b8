//! Shared configuration library for Ladle.
//!
//! Centralizes config defaults, file/environment loading and validation so
//! the server binary has a single source of truth for every knob. Loading
//! order is: built-in defaults, then an optional `ladle.toml`, then
//! `LADLE_*` environment variables (strongest).

pub mod loader;
pub mod models;

pub use loader::{ConfigLoadError, load};
pub use models::{
    Config, CorsConfig, DatabaseConfig, ImageCacheConfig, ServerConfig,
};
