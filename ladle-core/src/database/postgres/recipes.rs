use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::ports::RecipeRepository;
use crate::error::Result;
use crate::image::ImageReference;
use crate::types::Recipe;

const RECIPE_COLUMNS: &str = "id, title, subtitle, rating, source_url, \
     preview_image_url_template, cached_image_path, cached_image_url, \
     image_cached_at, additional_description, cooking_time, \
     preparation_time, resting_time, total_time, servings, difficulty, \
     instructions, ingredients_text, miscellaneous_text, source, source_id, \
     source_rating, source_rating_votes, source_view_count, status, \
     tag_ids, ingredient_groups, user_id, created_at";

#[derive(Clone, Debug)]
pub struct PostgresRecipeRepository {
    pool: PgPool,
}

impl PostgresRecipeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeRepository for PostgresRecipeRepository {
    async fn list(&self, limit: i64) -> Result<Vec<Recipe>> {
        let recipes = sqlx::query_as::<_, Recipe>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes \
             ORDER BY created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(recipes)
    }

    async fn create(&self, recipe: &Recipe) -> Result<Uuid> {
        let id = recipe.id.unwrap_or_else(Uuid::new_v4);
        let created_at = recipe.created_at.unwrap_or_else(Utc::now);

        sqlx::query(
            "INSERT INTO recipes (id, title, subtitle, rating, source_url, \
             preview_image_url_template, cached_image_path, \
             cached_image_url, image_cached_at, additional_description, \
             cooking_time, preparation_time, resting_time, total_time, \
             servings, difficulty, instructions, ingredients_text, \
             miscellaneous_text, source, source_id, source_rating, \
             source_rating_votes, source_view_count, status, tag_ids, \
             ingredient_groups, user_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, \
             $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, \
             $25, $26, $27, $28, $29)",
        )
        .bind(id)
        .bind(&recipe.title)
        .bind(&recipe.subtitle)
        .bind(recipe.rating)
        .bind(&recipe.source_url)
        .bind(&recipe.preview_image_url_template)
        .bind(&recipe.cached_image_path)
        .bind(&recipe.cached_image_url)
        .bind(recipe.image_cached_at)
        .bind(&recipe.additional_description)
        .bind(recipe.cooking_time)
        .bind(recipe.preparation_time)
        .bind(recipe.resting_time)
        .bind(recipe.total_time)
        .bind(recipe.servings)
        .bind(recipe.difficulty)
        .bind(&recipe.instructions)
        .bind(&recipe.ingredients_text)
        .bind(&recipe.miscellaneous_text)
        .bind(&recipe.source)
        .bind(&recipe.source_id)
        .bind(recipe.source_rating)
        .bind(recipe.source_rating_votes)
        .bind(recipe.source_view_count)
        .bind(&recipe.status)
        .bind(&recipe.tag_ids)
        .bind(recipe.ingredient_groups.clone())
        .bind(recipe.user_id)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Recipe>> {
        let recipe = sqlx::query_as::<_, Recipe>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(recipe)
    }

    async fn update(&self, id: Uuid, recipe: &Recipe) -> Result<bool> {
        // Full replacement except id and created_at, matching the
        // document-replacement semantics of the original API.
        let result = sqlx::query(
            "UPDATE recipes SET title = $2, subtitle = $3, rating = $4, \
             source_url = $5, preview_image_url_template = $6, \
             cached_image_path = $7, cached_image_url = $8, \
             image_cached_at = $9, additional_description = $10, \
             cooking_time = $11, preparation_time = $12, resting_time = $13, \
             total_time = $14, servings = $15, difficulty = $16, \
             instructions = $17, ingredients_text = $18, \
             miscellaneous_text = $19, source = $20, source_id = $21, \
             source_rating = $22, source_rating_votes = $23, \
             source_view_count = $24, status = $25, tag_ids = $26, \
             ingredient_groups = $27, user_id = $28 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&recipe.title)
        .bind(&recipe.subtitle)
        .bind(recipe.rating)
        .bind(&recipe.source_url)
        .bind(&recipe.preview_image_url_template)
        .bind(&recipe.cached_image_path)
        .bind(&recipe.cached_image_url)
        .bind(recipe.image_cached_at)
        .bind(&recipe.additional_description)
        .bind(recipe.cooking_time)
        .bind(recipe.preparation_time)
        .bind(recipe.resting_time)
        .bind(recipe.total_time)
        .bind(recipe.servings)
        .bind(recipe.difficulty)
        .bind(&recipe.instructions)
        .bind(&recipe.ingredients_text)
        .bind(&recipe.miscellaneous_text)
        .bind(&recipe.source)
        .bind(&recipe.source_id)
        .bind(recipe.source_rating)
        .bind(recipe.source_rating_votes)
        .bind(recipe.source_view_count)
        .bind(&recipe.status)
        .bind(&recipe.tag_ids)
        .bind(recipe.ingredient_groups.clone())
        .bind(recipe.user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn recommendations(&self, limit: i64) -> Result<Vec<Recipe>> {
        let recipes = sqlx::query_as::<_, Recipe>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes \
             WHERE preview_image_url_template IS NOT NULL \
             AND preview_image_url_template <> '' \
             ORDER BY random() LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(recipes)
    }

    async fn set_cached_image(
        &self,
        id: Uuid,
        reference: &ImageReference,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE recipes SET cached_image_path = $2, \
             cached_image_url = $3, image_cached_at = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(reference.cached_image_path.to_string_lossy().as_ref())
        .bind(&reference.cached_image_url)
        .bind(reference.image_cached_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
