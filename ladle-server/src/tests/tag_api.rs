use axum::http::StatusCode;
use ladle_core::database::ports::{
    MockCategoryRepository, MockRecipeRepository, MockTagRepository,
};
use mockall::predicate::eq;
use serde_json::json;
use tempfile::TempDir;
use uuid::Uuid;

use super::helpers::{
    assert_error, get, json_body, send_json, test_app, test_state,
};

fn state_with_tags(
    tags: MockTagRepository,
    root: &std::path::Path,
) -> crate::AppState {
    test_state(
        MockRecipeRepository::new(),
        tags,
        MockCategoryRepository::new(),
        root,
    )
}

#[tokio::test]
async fn list_passes_essential_filter() {
    let dir = TempDir::new().expect("tempdir");
    let mut repo = MockTagRepository::new();
    repo.expect_list()
        .with(eq(true))
        .times(1)
        .returning(|_| Ok(vec![]));

    let app = test_app(state_with_tags(repo, dir.path()));
    let response = get(app, "/api/v1/tags?essential_only=true").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn list_defaults_to_all_tags() {
    let dir = TempDir::new().expect("tempdir");
    let mut repo = MockTagRepository::new();
    repo.expect_list()
        .with(eq(false))
        .times(1)
        .returning(|_| Ok(vec![]));

    let app = test_app(state_with_tags(repo, dir.path()));
    let response = get(app, "/api/v1/tags").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_returns_id() {
    let dir = TempDir::new().expect("tempdir");
    let id = Uuid::new_v4();
    let mut repo = MockTagRepository::new();
    repo.expect_create().times(1).returning(move |_| Ok(id));

    let app = test_app(state_with_tags(repo, dir.path()));
    let response =
        send_json(app, "POST", "/api/v1/tags", json!({ "name": "vegan" }))
            .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await, json!(id));
}

#[tokio::test]
async fn create_rejects_short_name() {
    let dir = TempDir::new().expect("tempdir");
    let app = test_app(state_with_tags(MockTagRepository::new(), dir.path()));

    let response =
        send_json(app, "POST", "/api/v1/tags", json!({ "name": "v" })).await;
    assert_error(response, StatusCode::BAD_REQUEST).await;
}
