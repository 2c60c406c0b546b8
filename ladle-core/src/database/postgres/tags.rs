use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::ports::TagRepository;
use crate::error::Result;
use crate::types::Tag;

#[derive(Clone, Debug)]
pub struct PostgresTagRepository {
    pool: PgPool,
}

impl PostgresTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn list(&self, essential_only: bool) -> Result<Vec<Tag>> {
        let tags = sqlx::query_as::<_, Tag>(
            "SELECT id, name, category_id, is_essential, usage_count \
             FROM tags WHERE $1 = false OR is_essential \
             ORDER BY usage_count DESC, name ASC",
        )
        .bind(essential_only)
        .fetch_all(&self.pool)
        .await?;
        Ok(tags)
    }

    async fn create(&self, tag: &Tag) -> Result<Uuid> {
        let id = tag.id.unwrap_or_else(Uuid::new_v4);
        sqlx::query(
            "INSERT INTO tags (id, name, category_id, is_essential, \
             usage_count) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(&tag.name)
        .bind(tag.category_id)
        .bind(tag.is_essential)
        .bind(tag.usage_count)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn any_for_category(&self, category_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM tags WHERE category_id = $1)",
        )
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
