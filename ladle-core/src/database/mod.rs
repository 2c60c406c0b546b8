//! Repository ports and their Postgres implementations.
//!
//! Handlers depend only on the traits in [`ports`]; the `postgres` module
//! provides the production implementations over a shared [`sqlx::PgPool`].

pub mod ports;
pub mod postgres;

pub use ports::{CategoryRepository, RecipeRepository, TagRepository};
pub use postgres::{
    PostgresCategoryRepository, PostgresRecipeRepository,
    PostgresTagRepository,
};
