//! Typed errors for the recipe store and the planner.

use thiserror::Error;

/// Errors raised while loading the recipe store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read recipe file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch recipes from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse recipe document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid recipe '{name}': {reason}")]
    InvalidRecipe { name: String, reason: String },
}

/// Errors raised while building a shopping list.
#[derive(Error, Debug, PartialEq)]
pub enum PlannerError {
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),
}
