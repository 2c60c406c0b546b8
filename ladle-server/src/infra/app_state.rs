use std::{fmt, sync::Arc};

use ladle_config::Config;
use ladle_core::{
    ImageCache, RecommendationBuffer,
    database::{
        CategoryRepository, PostgresCategoryRepository,
        PostgresRecipeRepository, PostgresTagRepository, RecipeRepository,
        TagRepository,
    },
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub recipes: Arc<dyn RecipeRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub image_cache: Arc<ImageCache>,
    pub recommendations: Arc<RecommendationBuffer>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(config: Arc<Config>, pool: PgPool) -> anyhow::Result<Self> {
        let recipes: Arc<dyn RecipeRepository> =
            Arc::new(PostgresRecipeRepository::new(pool.clone()));
        let tags: Arc<dyn TagRepository> =
            Arc::new(PostgresTagRepository::new(pool.clone()));
        let categories: Arc<dyn CategoryRepository> =
            Arc::new(PostgresCategoryRepository::new(pool));

        let image_cache = Arc::new(ImageCache::new(&config.images)?);
        let recommendations =
            Arc::new(RecommendationBuffer::new(recipes.clone()));

        Ok(Self {
            config,
            recipes,
            tags,
            categories,
            image_cache,
            recommendations,
        })
    }
}
