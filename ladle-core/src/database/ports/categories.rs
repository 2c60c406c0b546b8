use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::types::Category;

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by name.
    async fn list(&self) -> Result<Vec<Category>>;

    async fn get(&self, id: Uuid) -> Result<Option<Category>>;

    /// Find a category by exact name, optionally ignoring one id (used for
    /// rename conflict checks).
    async fn get_by_name(
        &self,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<Option<Category>>;

    async fn create(&self, category: &Category) -> Result<Uuid>;

    /// Returns the updated record, or `None` when no such category exists.
    async fn update(
        &self,
        id: Uuid,
        category: &Category,
    ) -> Result<Option<Category>>;

    /// Returns `false` when no such category exists.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
