use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::image::ImageReference;
use crate::types::Recipe;

/// Persistence port for recipe records.
///
/// Image acquisition is deliberately not part of this port: the cache owns
/// the file tree and callers persist the returned reference fields here by
/// value via [`set_cached_image`](RecipeRepository::set_cached_image).
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn list(&self, limit: i64) -> Result<Vec<Recipe>>;

    async fn create(&self, recipe: &Recipe) -> Result<Uuid>;

    async fn get(&self, id: Uuid) -> Result<Option<Recipe>>;

    /// Replace a recipe. Returns `false` when no such recipe exists.
    async fn update(&self, id: Uuid, recipe: &Recipe) -> Result<bool>;

    /// Returns `false` when no such recipe exists.
    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// Random recipes carrying a preview image template, for the
    /// recommendations endpoint.
    async fn recommendations(&self, limit: i64) -> Result<Vec<Recipe>>;

    async fn set_cached_image(
        &self,
        id: Uuid,
        reference: &ImageReference,
    ) -> Result<()>;
}
