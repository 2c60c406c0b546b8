use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::types::Tag;

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// All tags, most used first. With `essential_only` set, only tags
    /// flagged as essential.
    async fn list(&self, essential_only: bool) -> Result<Vec<Tag>>;

    async fn create(&self, tag: &Tag) -> Result<Uuid>;

    /// Whether any tag still references the given category.
    async fn any_for_category(&self, category_id: Uuid) -> Result<bool>;
}
