//! Recipe API server.
//!
//! Serves recipe, tag and category CRUD over HTTP, backed by PostgreSQL,
//! and maintains an on-disk content-addressed cache of recipe preview
//! images mirrored from their source sites.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::{Json, Router, http::HeaderValue, routing::get};
use ladle_server::{AppState, routes::create_api_router};
use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const RECOMMENDATION_REFRESH_PERIOD: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(ladle_config::load()?);
    config.ensure_directories()?;

    let database_url = config
        .database
        .url
        .clone()
        .context("database URL not configured; set LADLE_DATABASE_URL")?;
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections())
        .connect(&database_url)
        .await
        .context("failed to connect to PostgreSQL")?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run database migrations")?;

    let state = AppState::new(config.clone(), pool)?;
    state
        .recommendations
        .spawn_refresher(RECOMMENDATION_REFRESH_PERIOD);

    let cors = build_cors_layer(&config.cors.allowed_origins)?;
    let app = Router::new()
        .route("/", get(welcome_handler))
        .merge(create_api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "recipe API listening");
    axum::serve(listener, app).await?;

    Ok(())
}

async fn welcome_handler() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Recipe API!" }))
}

fn build_cors_layer(allowed_origins: &[String]) -> anyhow::Result<CorsLayer> {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("invalid CORS origin {origin:?}"))
        })
        .collect::<anyhow::Result<_>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}
