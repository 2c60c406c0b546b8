use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Placeholder substituted with a concrete format specifier.
pub const FORMAT_PLACEHOLDER: &str = "<format>";

/// URL prefix under which cached images are served back.
pub const PUBLIC_IMAGE_PREFIX: &str = "/api/v1/images";

/// Extensions accepted verbatim from a resolved URL; anything else falls
/// back to `jpg`.
const KNOWN_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

/// Derived on-disk location of a cached image. Never stored; recomputed
/// from `(url_template, format)` whenever it is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLocation {
    pub path: PathBuf,
    pub filename: String,
}

impl ImageLocation {
    /// Derive the location for a resolved URL under `root`.
    ///
    /// Deterministic: the same `(url_template, format)` pair always maps to
    /// the same path, which is what makes concurrent acquisition benign.
    pub fn derive(root: &Path, resolved_url: &str, format: &str) -> Self {
        let key = content_key(resolved_url);
        let extension = infer_extension(resolved_url);
        let filename = format!("{key}_{format}.{extension}");
        let path = root
            .join(&key[..2])
            .join(&key[2..4])
            .join(&filename);
        Self { path, filename }
    }

    /// Rebuild the sharded path for a bare cache filename, without checking
    /// existence. Returns `None` for anything that cannot be a cache
    /// filename: the name is an opaque leaf component, so path separators
    /// are rejected outright, and the leading hash segment must be at least
    /// 4 hex characters to address both shard levels.
    pub fn from_filename(root: &Path, filename: &str) -> Option<Self> {
        if filename.contains(['/', '\\', '\0']) {
            return None;
        }
        let (hash, _) = filename.split_once('_')?;
        // Byte-level check: slicing by index would panic on a hash segment
        // whose 4th byte lands inside a multi-byte character.
        let prefix = hash.as_bytes().get(..4)?;
        if !prefix.iter().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let path = root.join(&hash[..2]).join(&hash[2..4]).join(filename);
        Some(Self {
            path,
            filename: filename.to_string(),
        })
    }
}

pub(super) fn resolve_template(url_template: &str, format: &str) -> String {
    url_template.replace(FORMAT_PLACEHOLDER, format)
}

/// Deterministic content key: lowercase hex SHA-256 of the resolved URL.
/// A cache key, not a security boundary; stability across runs is what
/// matters.
fn content_key(resolved_url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(resolved_url.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Extension inference: everything after the last `.` with query string and
/// fragment stripped, lowercased, checked against the whitelist.
fn infer_extension(resolved_url: &str) -> &'static str {
    let Some(dot) = resolved_url.rfind('.') else {
        return "jpg";
    };
    let tail = resolved_url[dot + 1..]
        .split(['?', '#'])
        .next()
        .unwrap_or("");
    let lowered = tail.to_ascii_lowercase();
    KNOWN_EXTENSIONS
        .iter()
        .find(|ext| **ext == lowered)
        .copied()
        .unwrap_or("jpg")
}
