use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use ladle_config::ImageCacheConfig;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio_util::io::StreamReader;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{LadleError, Result};

use super::location::{
    ImageLocation, PUBLIC_IMAGE_PREFIX, resolve_template,
};

/// Resolved local copy of a remote image, returned by
/// [`ImageCache::acquire`]. Callers persist these fields by value onto
/// their own records; the cache keeps no registry of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageReference {
    pub filename: String,
    pub cached_image_path: PathBuf,
    pub cached_image_url: String,
    pub image_cached_at: DateTime<Utc>,
}

/// Downloads remote images on demand and stores them in a two-level
/// sharded directory tree it exclusively owns.
///
/// Concurrent `acquire` calls for the same key may both download; that race
/// is benign because both target the same deterministic path and files are
/// published atomically, so readers never observe partial content.
#[derive(Debug, Clone)]
pub struct ImageCache {
    root: PathBuf,
    default_format: String,
    chunk_size: usize,
    http_client: reqwest::Client,
}

impl ImageCache {
    pub fn new(config: &ImageCacheConfig) -> Result<Self> {
        // An absolute root keeps stored file paths stable regardless of the
        // working directory the server was launched from.
        let root = if config.root_dir.is_absolute() {
            config.root_dir.clone()
        } else {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(&config.root_dir)
        };
        std::fs::create_dir_all(&root)?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.download_timeout_secs))
            .build()
            .map_err(|e| {
                LadleError::Internal(format!(
                    "failed to create HTTP client: {e}"
                ))
            })?;

        Ok(Self {
            root,
            default_format: config.default_format.clone(),
            chunk_size: config.chunk_size_bytes.max(512),
            http_client,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn default_format(&self) -> &str {
        &self.default_format
    }

    /// Derive the sharded location for a URL template and format specifier.
    pub fn locate(&self, url_template: &str, format: &str) -> ImageLocation {
        let resolved = resolve_template(url_template, format);
        ImageLocation::derive(&self.root, &resolved, format)
    }

    /// Download-or-reuse: return the local reference for the resolved URL,
    /// fetching it first if this process has never seen it.
    ///
    /// `owner_id` (typically a recipe id) is carried for diagnostics only;
    /// it has no bearing on the derived key. Cached files have no TTL —
    /// a hit is served regardless of age.
    pub async fn acquire(
        &self,
        owner_id: &str,
        url_template: &str,
        format: Option<&str>,
    ) -> Result<ImageReference> {
        let format = format.unwrap_or(&self.default_format);
        let resolved = resolve_template(url_template, format);
        let ImageLocation { path, filename } =
            ImageLocation::derive(&self.root, &resolved, format);

        if path.exists() {
            debug!(owner = owner_id, file = %filename, "image cache hit");
            return Ok(self.reference(path, filename));
        }

        let shard_dir = path.parent().ok_or_else(|| {
            LadleError::Internal("derived image path has no parent".into())
        })?;
        // Tolerates a concurrent caller creating the same shard.
        tokio::fs::create_dir_all(shard_dir).await?;

        let response = self
            .http_client
            .get(&resolved)
            .send()
            .await
            .map_err(|e| LadleError::download_transport(&resolved, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LadleError::download_status(&resolved, status.as_u16()));
        }

        debug!(
            owner = owner_id,
            url = %resolved,
            file = %filename,
            "downloading image"
        );

        // Stream to a uniquely named sibling temp file, then publish with
        // hard_link so concurrent readers never see partial bytes and an
        // existing file is never overwritten.
        let tmp_path = path
            .with_extension(format!("tmp.{}", Uuid::new_v4().simple()));
        if let Err(err) = self.stream_to_file(response, &tmp_path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(with_write_context(err, owner_id, &resolved));
        }

        match tokio::fs::hard_link(&tmp_path, &path).await {
            Ok(()) => {
                let _ = tokio::fs::remove_file(&tmp_path).await;
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                // Another writer won the race; its bytes are identical.
                let _ = tokio::fs::remove_file(&tmp_path).await;
                debug!(file = %filename, "concurrent writer already published");
            }
            Err(e) => {
                let _ = tokio::fs::remove_file(&tmp_path).await;
                return Err(with_write_context(e.into(), owner_id, &resolved));
            }
        }

        Ok(self.reference(path, filename))
    }

    async fn stream_to_file(
        &self,
        response: reqwest::Response,
        tmp_path: &Path,
    ) -> Result<()> {
        let stream = response
            .bytes_stream()
            .map_err(std::io::Error::other);
        let mut reader = StreamReader::new(stream);

        let file = tokio::fs::File::create(tmp_path).await?;
        let mut writer =
            tokio::io::BufWriter::with_capacity(self.chunk_size, file);
        tokio::io::copy(&mut reader, &mut writer).await?;
        writer.flush().await?;
        // Contents must be durable before the link publishes them.
        writer.into_inner().sync_all().await?;
        Ok(())
    }

    /// Map a cache filename back to its on-disk path, if the file exists.
    pub fn resolve(&self, filename: &str) -> Option<PathBuf> {
        let location = ImageLocation::from_filename(&self.root, filename)?;
        location.path.exists().then_some(location.path)
    }

    /// Delete a cached file. Returns `false` for unknown filenames and for
    /// OS-level deletion failures; deletion is never an error. Empty shard
    /// directories are cleaned up opportunistically afterwards.
    pub fn remove(&self, filename: &str) -> bool {
        let Some(path) = self.resolve(filename) else {
            return false;
        };
        if let Err(err) = std::fs::remove_file(&path) {
            warn!(file = filename, error = %err, "failed to delete cached image");
            return false;
        }
        self.cleanup_shards(&path);
        true
    }

    /// Best-effort removal of now-empty shard directories, never the root.
    /// `remove_dir` refuses non-empty directories, which is exactly the
    /// check needed; all errors are swallowed.
    fn cleanup_shards(&self, deleted: &Path) {
        let Some(level2) = deleted.parent() else {
            return;
        };
        if std::fs::remove_dir(level2).is_err() {
            return;
        }
        if let Some(level1) = level2.parent()
            && level1 != self.root
        {
            let _ = std::fs::remove_dir(level1);
        }
    }

    fn reference(&self, path: PathBuf, filename: String) -> ImageReference {
        ImageReference {
            cached_image_url: format!("{PUBLIC_IMAGE_PREFIX}/{filename}"),
            cached_image_path: path,
            filename,
            image_cached_at: Utc::now(),
        }
    }
}

/// Attach the owner and resolved URL to a filesystem error raised while
/// storing a download, so the failure is diagnosable wherever it ends up.
fn with_write_context(
    err: LadleError,
    owner_id: &str,
    resolved_url: &str,
) -> LadleError {
    match err {
        LadleError::Io(io) => LadleError::Io(std::io::Error::new(
            io.kind(),
            format!(
                "failed to store image for {owner_id} from {resolved_url}: {io}"
            ),
        )),
        other => other,
    }
}
