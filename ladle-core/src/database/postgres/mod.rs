mod categories;
mod recipes;
mod tags;

pub use categories::PostgresCategoryRepository;
pub use recipes::PostgresRecipeRepository;
pub use tags::PostgresTagRepository;
