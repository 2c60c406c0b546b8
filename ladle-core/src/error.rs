use thiserror::Error;

#[derive(Error, Debug)]
pub enum LadleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Non-2xx status or transport failure while fetching a remote image.
    /// Carries the resolved URL and, when the remote answered, its status.
    #[error("failed to download image from {url}: {reason}")]
    DownloadFailed {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl LadleError {
    pub fn download_status(url: impl Into<String>, status: u16) -> Self {
        Self::DownloadFailed {
            url: url.into(),
            status: Some(status),
            reason: format!("HTTP {status}"),
        }
    }

    pub fn download_transport(
        url: impl Into<String>,
        source: &reqwest::Error,
    ) -> Self {
        Self::DownloadFailed {
            url: url.into(),
            status: source.status().map(|s| s.as_u16()),
            reason: source.to_string(),
        }
    }

    /// Map a database error, turning a unique-constraint violation into a
    /// domain conflict. Lets repositories surface races on unique columns
    /// as [`Conflict`](Self::Conflict) instead of a generic database error.
    pub fn from_unique_violation(
        err: sqlx::Error,
        conflict: impl Into<String>,
    ) -> Self {
        if let sqlx::Error::Database(db) = &err
            && db.is_unique_violation()
        {
            return Self::Conflict(conflict.into());
        }
        Self::Database(err)
    }
}


pub type Result<T> = std::result::Result<T, LadleError>;
