//! # Ladle Server
//!
//! HTTP API for the Ladle recipe backend.
//!
//! Built on Axum with PostgreSQL for persistence and an on-disk sharded
//! cache that mirrors externally hosted recipe images locally. Recipes,
//! tags and categories are plain CRUD surfaces; image acquisition is
//! best-effort and never fails a recipe operation.

pub mod errors;
pub mod infra;
pub mod media;
pub mod recipes;
pub mod routes;
pub mod taxonomy;

#[cfg(test)]
mod tests;

pub use errors::{AppError, AppResult};
pub use infra::app_state::AppState;
