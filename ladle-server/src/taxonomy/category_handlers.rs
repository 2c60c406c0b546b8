use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use ladle_core::types::Category;
use uuid::Uuid;

use crate::{AppError, AppResult, AppState};

pub async fn list_categories_handler(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = state.categories.list().await?;
    Ok(Json(categories))
}

pub async fn get_category_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Category>> {
    let Some(category) = state.categories.get(id).await? else {
        return Err(AppError::not_found("Category not found"));
    };
    Ok(Json(category))
}

pub async fn create_category_handler(
    State(state): State<AppState>,
    Json(category): Json<Category>,
) -> AppResult<(StatusCode, Json<Uuid>)> {
    category.validate()?;
    if state
        .categories
        .get_by_name(&category.name, None)
        .await?
        .is_some()
    {
        return Err(AppError::conflict("A category with this name already exists"));
    }
    let id = state.categories.create(&category).await?;
    Ok((StatusCode::CREATED, Json(id)))
}

pub async fn update_category_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(category): Json<Category>,
) -> AppResult<Json<Category>> {
    category.validate()?;
    // Renaming onto another category's name is a conflict; keeping the
    // current name is fine.
    if state
        .categories
        .get_by_name(&category.name, Some(id))
        .await?
        .is_some()
    {
        return Err(AppError::conflict("A category with this name already exists"));
    }
    let Some(updated) = state.categories.update(id, &category).await? else {
        return Err(AppError::not_found("Category not found"));
    };
    Ok(Json(updated))
}

pub async fn delete_category_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if state.tags.any_for_category(id).await? {
        return Err(AppError::conflict(
            "Category is still referenced by one or more tags",
        ));
    }
    if !state.categories.delete(id).await? {
        return Err(AppError::not_found("Category not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
