//! Domain records exchanged over the API and stored in Postgres.
//!
//! Field names stay camelCase on the wire to match the existing clients;
//! everything optional in a payload is an `Option` here rather than a
//! loosely typed map.

mod recipe;
mod taxonomy;

pub use recipe::{Ingredient, IngredientGroup, Recipe};
pub use taxonomy::{Category, Tag};
