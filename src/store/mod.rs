//! Recipe store access.

pub mod loader;

pub use loader::{load_recipes, LoadOptions, RecipeSource};
