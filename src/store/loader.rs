//! Recipe file loading.
//!
//! This module reads the recipe document once at startup, either from
//! a local file or over HTTP, and checks it before handing it out.

use crate::error::StoreError;
use crate::models::RecipeBook;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Where the recipe document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeSource {
    /// A JSON file on disk.
    File(PathBuf),
    /// A JSON document served over HTTP(S).
    Url(String),
}

impl RecipeSource {
    /// Treats `http://` and `https://` strings as URLs, anything else as a path.
    pub fn parse(source: &str) -> Self {
        let trimmed = source.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            RecipeSource::Url(trimmed.to_string())
        } else {
            RecipeSource::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for RecipeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeSource::File(path) => write!(f, "{}", path.display()),
            RecipeSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Options for loading the recipe document.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Request timeout for remote sources.
    pub timeout: Duration,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// Load and validate the recipe document.
///
/// A failed load is an error; a document with no recipes loads fine.
pub async fn load_recipes(
    source: &RecipeSource,
    options: &LoadOptions,
) -> Result<RecipeBook, StoreError> {
    info!("Loading recipes from: {}", source);

    let content = match source {
        RecipeSource::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| StoreError::Read {
                    path: path.display().to_string(),
                    source: e,
                })?
        }
        RecipeSource::Url(url) => fetch_document(url, options.timeout).await?,
    };

    let book = parse_recipes(&content)?;
    info!("Loaded {} recipes", book.len());

    Ok(book)
}

/// Parse and validate a recipe document.
pub fn parse_recipes(content: &str) -> Result<RecipeBook, StoreError> {
    let book: RecipeBook = serde_json::from_str(content)?;
    validate(&book)?;
    Ok(book)
}

async fn fetch_document(url: &str, timeout: Duration) -> Result<String, StoreError> {
    let fetch_err = |e: reqwest::Error| StoreError::Fetch {
        url: url.to_string(),
        source: e,
    };

    debug!("Fetching {} (timeout {}s)", url, timeout.as_secs());

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(fetch_err)?;

    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(fetch_err)?;

    response.text().await.map_err(fetch_err)
}

fn validate(book: &RecipeBook) -> Result<(), StoreError> {
    if book.is_empty() {
        warn!("Recipe store contains no recipes");
        return Ok(());
    }

    let mut names = HashSet::new();
    for recipe in &book.recipes {
        if recipe.portions == 0 {
            return Err(StoreError::InvalidRecipe {
                name: recipe.name.clone(),
                reason: "portions must be at least 1".to_string(),
            });
        }

        if !names.insert(recipe.name.as_str()) {
            warn!(
                "Duplicate recipe name '{}'; the first one will be used",
                recipe.name
            );
        }
    }

    Ok(())
}
