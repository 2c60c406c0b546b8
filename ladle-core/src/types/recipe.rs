use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use crate::error::{LadleError, Result};

/// A single ingredient line inside a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub ingredient_id: Option<Uuid>,
    pub unit_id: Option<Uuid>,
    pub amount: Option<f64>,
}

/// Ingredients grouped under an optional header ("For the sauce:").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientGroup {
    pub header: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
}

/// A recipe record. The cached image fields are copies of an
/// [`ImageReference`](crate::ImageReference) resolved at creation time or
/// lazily on first read; a recipe is valid with or without them.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Option<Uuid>,
    pub title: String,
    pub subtitle: Option<String>,
    pub rating: Option<f64>,
    pub source_url: Option<String>,
    /// Remote image URL containing a `<format>` placeholder.
    pub preview_image_url_template: Option<String>,
    pub cached_image_path: Option<String>,
    pub cached_image_url: Option<String>,
    pub image_cached_at: Option<DateTime<Utc>>,
    pub additional_description: Option<String>,
    pub cooking_time: Option<i32>,
    pub preparation_time: Option<i32>,
    pub resting_time: Option<i32>,
    pub total_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<i32>,
    pub instructions: Option<String>,
    pub ingredients_text: Option<String>,
    pub miscellaneous_text: Option<String>,
    pub source: Option<String>,
    pub source_id: Option<String>,
    pub source_rating: Option<f64>,
    pub source_rating_votes: Option<i32>,
    pub source_view_count: Option<i32>,
    pub status: Option<String>,
    pub tag_ids: Option<Vec<Uuid>>,
    pub ingredient_groups: Option<Json<Vec<IngredientGroup>>>,
    pub user_id: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Recipe {
    pub fn validate(&self) -> Result<()> {
        let title_len = self.title.chars().count();
        if !(2..=100).contains(&title_len) {
            return Err(LadleError::Validation(
                "title must be between 2 and 100 characters".into(),
            ));
        }
        if let Some(rating) = self.rating
            && !(0.0..=5.0).contains(&rating)
        {
            return Err(LadleError::Validation(
                "rating must be between 0 and 5".into(),
            ));
        }
        validate_url_field("sourceUrl", self.source_url.as_deref())?;
        validate_url_field(
            "previewImageUrlTemplate",
            self.preview_image_url_template.as_deref(),
        )?;
        Ok(())
    }

    /// Whether a remote preview exists but has not been mirrored locally.
    pub fn needs_image_resolution(&self) -> bool {
        self.preview_image_url_template
            .as_deref()
            .is_some_and(|t| !t.is_empty())
            && self.cached_image_url.is_none()
    }
}

fn validate_url_field(name: &str, value: Option<&str>) -> Result<()> {
    if let Some(url) = value
        && !(10..=2000).contains(&url.chars().count())
    {
        return Err(LadleError::Validation(format!(
            "{name} must be between 10 and 2000 characters"
        )));
    }
    Ok(())
}
