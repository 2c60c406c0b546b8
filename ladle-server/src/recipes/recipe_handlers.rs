use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use ladle_core::recommend::RECOMMENDATION_SERVING;
use ladle_core::types::Recipe;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{AppError, AppResult, AppState};

const DEFAULT_LIST_LIMIT: i64 = 20;
const MAX_LIST_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct ListRecipesQuery {
    pub limit: Option<i64>,
}

pub async fn list_recipes_handler(
    State(state): State<AppState>,
    Query(query): Query<ListRecipesQuery>,
) -> AppResult<Json<Vec<Recipe>>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);
    let recipes = state.recipes.list(limit).await?;
    Ok(Json(recipes))
}

pub async fn create_recipe_handler(
    State(state): State<AppState>,
    Json(recipe): Json<Recipe>,
) -> AppResult<(StatusCode, Json<Uuid>)> {
    recipe.validate()?;
    let id = state.recipes.create(&recipe).await?;

    // Image acquisition is best effort: a dead preview URL must not fail
    // the create. The image is retried lazily on the next read.
    if let Some(template) = recipe.preview_image_url_template.as_deref() {
        if !template.is_empty() {
            resolve_preview_image(&state, id, template).await;
        }
    }

    Ok((StatusCode::CREATED, Json(id)))
}

pub async fn get_recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Recipe>> {
    let Some(recipe) = state.recipes.get(id).await? else {
        return Err(AppError::not_found("Recipe not found"));
    };

    if recipe.needs_image_resolution() {
        if let Some(template) = recipe.preview_image_url_template.as_deref() {
            if resolve_preview_image(&state, id, template).await {
                if let Some(refreshed) = state.recipes.get(id).await? {
                    return Ok(Json(refreshed));
                }
            }
        }
    }

    Ok(Json(recipe))
}

pub async fn update_recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(recipe): Json<Recipe>,
) -> AppResult<StatusCode> {
    recipe.validate()?;
    if !state.recipes.update(id, &recipe).await? {
        return Err(AppError::not_found("Recipe not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_recipe_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !state.recipes.delete(id).await? {
        return Err(AppError::not_found("Recipe not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn recommendations_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Value>> {
    let recipes = state.recommendations.take(RECOMMENDATION_SERVING).await?;
    Ok(Json(json!({ "recommendations": recipes })))
}

/// Fetch the preview image for a recipe and persist the cache reference.
/// Returns whether the recipe record was updated.
async fn resolve_preview_image(state: &AppState, id: Uuid, template: &str) -> bool {
    let owner = id.to_string();
    let reference = match state.image_cache.acquire(&owner, template, None).await {
        Ok(reference) => reference,
        Err(err) => {
            warn!(recipe_id = %id, error = %err, "preview image acquisition failed");
            return false;
        }
    };
    debug!(recipe_id = %id, file = %reference.filename, "preview image cached");

    if let Err(err) = state.recipes.set_cached_image(id, &reference).await {
        warn!(recipe_id = %id, error = %err, "failed to persist cached image reference");
        return false;
    }
    true
}
