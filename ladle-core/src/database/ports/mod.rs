mod categories;
mod recipes;
mod tags;

pub use categories::CategoryRepository;
pub use recipes::RecipeRepository;
pub use tags::TagRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use categories::MockCategoryRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use recipes::MockRecipeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use tags::MockTagRepository;
