use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::ports::CategoryRepository;
use crate::error::{LadleError, Result};
use crate::types::Category;

const CATEGORY_COLUMNS: &str =
    "id, name, description, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    async fn get_by_name(
        &self,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories \
             WHERE name = $1 AND ($2::uuid IS NULL OR id <> $2)"
        ))
        .bind(name)
        .bind(exclude)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    async fn create(&self, category: &Category) -> Result<Uuid> {
        let id = category.id.unwrap_or_else(Uuid::new_v4);
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO categories (id, name, description, created_at, \
             updated_at) VALUES ($1, $2, $3, $4, $4)",
        )
        .bind(id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(now)
        .execute(&self.pool)
        .await
        // A concurrent create can slip past the handler's read-then-insert
        // name check; the UNIQUE constraint is the arbiter.
        .map_err(|e| {
            LadleError::from_unique_violation(
                e,
                "a category with this name already exists",
            )
        })?;
        Ok(id)
    }

    async fn update(
        &self,
        id: Uuid,
        category: &Category,
    ) -> Result<Option<Category>> {
        let updated = sqlx::query_as::<_, Category>(&format!(
            "UPDATE categories SET name = $2, description = $3, \
             updated_at = $4 WHERE id = $1 RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            LadleError::from_unique_violation(
                e,
                "a category with this name already exists",
            )
        })?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
