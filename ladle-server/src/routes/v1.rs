use axum::{Router, routing::get};

use crate::{
    AppState,
    media::image_handlers,
    recipes::recipe_handlers,
    taxonomy::{category_handlers, tag_handlers},
};

/// Create all v1 API routes.
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        // Recipes; the static recommendations segment must be routed before
        // the `{id}` capture.
        .route(
            "/recipes",
            get(recipe_handlers::list_recipes_handler)
                .post(recipe_handlers::create_recipe_handler),
        )
        .route(
            "/recipes/recommendations",
            get(recipe_handlers::recommendations_handler),
        )
        .route(
            "/recipes/{id}",
            get(recipe_handlers::get_recipe_handler)
                .put(recipe_handlers::update_recipe_handler)
                .delete(recipe_handlers::delete_recipe_handler),
        )
        // Tags
        .route(
            "/tags",
            get(tag_handlers::list_tags_handler)
                .post(tag_handlers::create_tag_handler),
        )
        // Categories
        .route(
            "/categories",
            get(category_handlers::list_categories_handler)
                .post(category_handlers::create_category_handler),
        )
        .route(
            "/categories/{id}",
            get(category_handlers::get_category_handler)
                .put(category_handlers::update_category_handler)
                .delete(category_handlers::delete_category_handler),
        )
        // Cached image serving; GET only, other methods get 405 from the
        // method router.
        .route(
            "/images/{filename}",
            get(image_handlers::serve_image_handler),
        )
}
