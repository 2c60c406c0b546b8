use crate::{AppError, AppState};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

/// Serve a cached image file.
///
/// The filename is the cache key (`{hash}_{format}.{ext}`); anything the
/// cache cannot resolve is a plain 404. Successful responses carry a
/// 24-hour public cache directive since cached images never change.
pub async fn serve_image_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let Some(path) = state.image_cache.resolve(&filename) else {
        debug!(filename, "cached image not found");
        return Err(AppError::not_found("Image not found"));
    };

    let data = tokio::fs::read(&path).await.map_err(|err| {
        error!(?path, %err, "failed to read cached image");
        AppError::internal("failed to read cached image")
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static(content_type_for(&filename)),
    );
    headers.insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("public, max-age=86400"),
    );

    Ok((headers, data).into_response())
}

fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit('.')
        .next()
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}
