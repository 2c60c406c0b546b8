use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode},
};
use ladle_config::{Config, ImageCacheConfig};
use ladle_core::{
    ImageCache, RecommendationBuffer,
    database::ports::{
        MockCategoryRepository, MockRecipeRepository, MockTagRepository,
    },
    types::Recipe,
};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::{AppState, routes::create_api_router};

/// Assemble an [`AppState`] from mock repositories and a real image cache
/// rooted in a temp directory.
pub fn test_state(
    recipes: MockRecipeRepository,
    tags: MockTagRepository,
    categories: MockCategoryRepository,
    cache_root: &Path,
) -> AppState {
    let images = ImageCacheConfig {
        root_dir: cache_root.to_path_buf(),
        ..ImageCacheConfig::default()
    };
    let config = Config {
        images: images.clone(),
        ..Config::default()
    };

    let recipes: Arc<dyn ladle_core::database::RecipeRepository> =
        Arc::new(recipes);
    let recommendations = Arc::new(RecommendationBuffer::new(recipes.clone()));
    let image_cache =
        Arc::new(ImageCache::new(&images).expect("image cache in temp dir"));

    AppState {
        config: Arc::new(config),
        recipes,
        tags: Arc::new(tags),
        categories: Arc::new(categories),
        image_cache,
        recommendations,
    }
}

pub fn test_app(state: AppState) -> Router {
    create_api_router().with_state(state)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request routed")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    send(app, request).await
}

pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    send(app, request).await
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

pub async fn assert_error(
    response: Response<Body>,
    status: StatusCode,
) -> Value {
    assert_eq!(response.status(), status);
    let body = json_body(response).await;
    assert!(body["error"]["message"].is_string(), "error body: {body}");
    body
}

/// Minimal valid recipe; serde fills every omitted optional field.
pub fn sample_recipe(title: &str) -> Recipe {
    recipe_from(json!({ "title": title }))
}

pub fn recipe_from(value: Value) -> Recipe {
    serde_json::from_value(value).expect("recipe value")
}
