use axum::http::StatusCode;
use ladle_core::{
    database::ports::{
        MockCategoryRepository, MockRecipeRepository, MockTagRepository,
    },
    types::Category,
};
use mockall::predicate::eq;
use serde_json::json;
use tempfile::TempDir;
use uuid::Uuid;

use super::helpers::{
    assert_error, get, json_body, send_json, test_app, test_state,
};

fn state_with(
    tags: MockTagRepository,
    categories: MockCategoryRepository,
    root: &std::path::Path,
) -> crate::AppState {
    test_state(MockRecipeRepository::new(), tags, categories, root)
}

fn sample_category(id: Option<Uuid>, name: &str) -> Category {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "description": "A sample grouping of tags",
    }))
    .expect("category value")
}

#[tokio::test]
async fn create_returns_id() {
    let dir = TempDir::new().expect("tempdir");
    let id = Uuid::new_v4();
    let mut repo = MockCategoryRepository::new();
    repo.expect_get_by_name().times(1).returning(|_, _| Ok(None));
    repo.expect_create().times(1).returning(move |_| Ok(id));

    let app = test_app(state_with(MockTagRepository::new(), repo, dir.path()));
    let response = send_json(
        app,
        "POST",
        "/api/v1/categories",
        json!({ "name": "Cuisine", "description": "Regional cuisines" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await, json!(id));
}

#[tokio::test]
async fn create_duplicate_name_is_409() {
    let dir = TempDir::new().expect("tempdir");
    let mut repo = MockCategoryRepository::new();
    repo.expect_get_by_name()
        .withf(|name, exclude| name == "Cuisine" && exclude.is_none())
        .times(1)
        .returning(|_, _| Ok(Some(sample_category(Some(Uuid::new_v4()), "Cuisine"))));

    let app = test_app(state_with(MockTagRepository::new(), repo, dir.path()));
    let response = send_json(
        app,
        "POST",
        "/api/v1/categories",
        json!({ "name": "Cuisine", "description": "Regional cuisines" }),
    )
    .await;
    assert_error(response, StatusCode::CONFLICT).await;
}

#[tokio::test]
async fn concurrent_duplicate_create_is_409() {
    let dir = TempDir::new().expect("tempdir");
    let mut repo = MockCategoryRepository::new();
    // The name check passes, but a concurrent insert wins the race and the
    // repository surfaces the unique violation as a conflict.
    repo.expect_get_by_name().times(1).returning(|_, _| Ok(None));
    repo.expect_create().times(1).returning(|_| {
        Err(ladle_core::LadleError::Conflict(
            "a category with this name already exists".into(),
        ))
    });

    let app = test_app(state_with(MockTagRepository::new(), repo, dir.path()));
    let response = send_json(
        app,
        "POST",
        "/api/v1/categories",
        json!({ "name": "Cuisine", "description": "Regional cuisines" }),
    )
    .await;
    assert_error(response, StatusCode::CONFLICT).await;
}

#[tokio::test]
async fn get_missing_category_is_404() {
    let dir = TempDir::new().expect("tempdir");
    let mut repo = MockCategoryRepository::new();
    repo.expect_get().times(1).returning(|_| Ok(None));

    let app = test_app(state_with(MockTagRepository::new(), repo, dir.path()));
    let response =
        get(app, &format!("/api/v1/categories/{}", Uuid::new_v4())).await;
    assert_error(response, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn update_returns_updated_record() {
    let dir = TempDir::new().expect("tempdir");
    let id = Uuid::new_v4();
    let mut repo = MockCategoryRepository::new();
    repo.expect_get_by_name()
        .withf(move |name, exclude| name == "Diet" && *exclude == Some(id))
        .times(1)
        .returning(|_, _| Ok(None));
    repo.expect_update()
        .times(1)
        .returning(move |_, _| Ok(Some(sample_category(Some(id), "Diet"))));

    let app = test_app(state_with(MockTagRepository::new(), repo, dir.path()));
    let response = send_json(
        app,
        "PUT",
        &format!("/api/v1/categories/{id}"),
        json!({ "name": "Diet", "description": "Dietary restrictions" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["name"], json!("Diet"));
    assert_eq!(body["id"], json!(id));
}

#[tokio::test]
async fn rename_onto_existing_name_is_409() {
    let dir = TempDir::new().expect("tempdir");
    let id = Uuid::new_v4();
    let mut repo = MockCategoryRepository::new();
    repo.expect_get_by_name()
        .withf(move |name, exclude| name == "Diet" && *exclude == Some(id))
        .times(1)
        .returning(|_, _| Ok(Some(sample_category(Some(Uuid::new_v4()), "Diet"))));

    let app = test_app(state_with(MockTagRepository::new(), repo, dir.path()));
    let response = send_json(
        app,
        "PUT",
        &format!("/api/v1/categories/{id}"),
        json!({ "name": "Diet", "description": "Dietary restrictions" }),
    )
    .await;
    assert_error(response, StatusCode::CONFLICT).await;
}

#[tokio::test]
async fn delete_blocked_while_tags_reference_it() {
    let dir = TempDir::new().expect("tempdir");
    let id = Uuid::new_v4();
    let mut tags = MockTagRepository::new();
    tags.expect_any_for_category()
        .with(eq(id))
        .times(1)
        .returning(|_| Ok(true));
    // No delete expectation: the conflict must short-circuit.
    let categories = MockCategoryRepository::new();

    let app = test_app(state_with(tags, categories, dir.path()));
    let response = send_json(
        app,
        "DELETE",
        &format!("/api/v1/categories/{id}"),
        json!(null),
    )
    .await;
    assert_error(response, StatusCode::CONFLICT).await;
}

#[tokio::test]
async fn delete_returns_no_content() {
    let dir = TempDir::new().expect("tempdir");
    let mut tags = MockTagRepository::new();
    tags.expect_any_for_category().returning(|_| Ok(false));
    let mut categories = MockCategoryRepository::new();
    categories.expect_delete().times(1).returning(|_| Ok(true));

    let app = test_app(state_with(tags, categories, dir.path()));
    let response = send_json(
        app,
        "DELETE",
        &format!("/api/v1/categories/{}", Uuid::new_v4()),
        json!(null),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn delete_missing_category_is_404() {
    let dir = TempDir::new().expect("tempdir");
    let mut tags = MockTagRepository::new();
    tags.expect_any_for_category().returning(|_| Ok(false));
    let mut categories = MockCategoryRepository::new();
    categories.expect_delete().times(1).returning(|_| Ok(false));

    let app = test_app(state_with(tags, categories, dir.path()));
    let response = send_json(
        app,
        "DELETE",
        &format!("/api/v1/categories/{}", Uuid::new_v4()),
        json!(null),
    )
    .await;
    assert_error(response, StatusCode::NOT_FOUND).await;
}
