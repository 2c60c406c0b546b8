use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use ladle_core::types::Tag;
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppResult, AppState};

#[derive(Debug, Deserialize)]
pub struct ListTagsQuery {
    #[serde(default)]
    pub essential_only: bool,
}

pub async fn list_tags_handler(
    State(state): State<AppState>,
    Query(query): Query<ListTagsQuery>,
) -> AppResult<Json<Vec<Tag>>> {
    let tags = state.tags.list(query.essential_only).await?;
    Ok(Json(tags))
}

pub async fn create_tag_handler(
    State(state): State<AppState>,
    Json(tag): Json<Tag>,
) -> AppResult<(StatusCode, Json<Uuid>)> {
    tag.validate()?;
    let id = state.tags.create(&tag).await?;
    Ok((StatusCode::CREATED, Json(id)))
}
