use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration for the Ladle server.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub images: ImageCacheConfig,
}

impl Config {
    /// Create every directory the server writes into.
    pub fn ensure_directories(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.images.root_dir)?;
        Ok(())
    }

    pub fn image_cache_root(&self) -> &Path {
        &self.images.root_dir
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// The database URL has no default; it must come from the config file or
/// the `LADLE_DATABASE_URL` environment variable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
}

impl DatabaseConfig {
    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or(8)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost".to_string(),
                "http://localhost:8000".to_string(),
            ],
        }
    }
}

/// Options recognized by the sharded image cache.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageCacheConfig {
    /// Root of the on-disk cache tree, created at startup if absent.
    pub root_dir: PathBuf,
    /// Format specifier substituted for `<format>` when none is requested.
    pub default_format: String,
    /// Timeout for outbound image downloads.
    pub download_timeout_secs: u64,
    /// Write-buffer size used while streaming a download to disk.
    pub chunk_size_bytes: usize,
}

impl Default for ImageCacheConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("cache/recipe_images"),
            default_format: "crop-360x240".to_string(),
            download_timeout_secs: 30,
            chunk_size_bytes: 8192,
        }
    }
}
