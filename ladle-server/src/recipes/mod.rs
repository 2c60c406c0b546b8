pub mod recipe_handlers;
