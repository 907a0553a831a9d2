//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.mealplan.toml` files. The reference lists the planner works
//! with (categories and staples) live here as plain data.

use crate::analysis::staples::{
    DEFAULT_SEASONING_CATEGORIES, DEFAULT_SEASONING_NAME, DEFAULT_SEASONING_TERMS, DEFAULT_STAPLES,
};
use crate::analysis::{ListRules, StapleCatalog};
use crate::cli::OutputFormat;
use crate::models::{Category, SumMode};
use crate::store::LoadOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".mealplan.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Shopping list building.
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Reference staple list.
    #[serde(default)]
    pub staples: StaplesConfig,

    /// Recipe store access.
    #[serde(default)]
    pub store: StoreConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Recipe file path or URL.
    #[serde(default = "default_recipes")]
    pub recipes: String,

    /// Default output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            recipes: default_recipes(),
            format: OutputFormat::default(),
            verbose: false,
        }
    }
}

fn default_recipes() -> String {
    "recipes.json".to_string()
}

/// Shopping list settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Section order of the shopping list.
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,

    /// How duplicate lines combine their amounts.
    #[serde(default)]
    pub sum_mode: SumMode,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            sum_mode: SumMode::default(),
        }
    }
}

fn default_categories() -> Vec<Category> {
    Category::ALL.to_vec()
}

/// Staples the user can tick as already owned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaplesConfig {
    /// Recognized staple names.
    #[serde(default = "default_staple_items")]
    pub items: Vec<String>,

    /// Substrings that fold an item into the seasoning staple.
    #[serde(default = "default_seasoning_terms")]
    pub seasoning_terms: Vec<String>,

    /// Name of the seasoning staple.
    #[serde(default = "default_seasoning_name")]
    pub seasoning_name: String,

    /// Categories whose items may fold into the seasoning staple.
    #[serde(default = "default_seasoning_categories")]
    pub seasoning_categories: Vec<Category>,
}

impl Default for StaplesConfig {
    fn default() -> Self {
        Self {
            items: default_staple_items(),
            seasoning_terms: default_seasoning_terms(),
            seasoning_name: default_seasoning_name(),
            seasoning_categories: default_seasoning_categories(),
        }
    }
}

fn default_staple_items() -> Vec<String> {
    DEFAULT_STAPLES.iter().map(|s| s.to_string()).collect()
}

fn default_seasoning_terms() -> Vec<String> {
    DEFAULT_SEASONING_TERMS.iter().map(|s| s.to_string()).collect()
}

fn default_seasoning_name() -> String {
    DEFAULT_SEASONING_NAME.to_string()
}

fn default_seasoning_categories() -> Vec<Category> {
    DEFAULT_SEASONING_CATEGORIES.to_vec()
}

/// Recipe store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Request timeout in seconds for remote recipe files.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Show preparation notes next to items.
    #[serde(default = "default_true")]
    pub include_prep: bool,

    /// List the selected recipes above the shopping list.
    #[serde(default = "default_true")]
    pub include_selection: bool,

    /// Heading of the shopping list.
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_prep: true,
            include_selection: true,
            title: default_title(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_title() -> String {
    "Shopping List".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.mealplan.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref recipes) = args.recipes {
            self.general.recipes = recipes.clone();
        }

        if let Some(format) = args.format {
            self.general.format = format;
        }

        if let Some(sum_mode) = args.sum_mode {
            self.planner.sum_mode = sum_mode;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Aggregation rules built from the planner and staples sections.
    pub fn list_rules(&self) -> ListRules {
        ListRules {
            category_order: self.planner.categories.clone(),
            sum_mode: self.planner.sum_mode,
            catalog: StapleCatalog::from(&self.staples),
        }
    }

    /// Recipe store options.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            timeout: Duration::from_secs(self.store.timeout_seconds),
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.recipes, "recipes.json");
        assert_eq!(config.planner.categories, Category::ALL.to_vec());
        assert_eq!(config.planner.sum_mode, SumMode::Available);
        assert!(config.staples.items.contains(&"salt and pepper".to_string()));
        assert_eq!(config.store.timeout_seconds, 30);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
recipes = "https://example.com/recipes.json"
format = "json"
verbose = true

[planner]
categories = ["Meat", "Fruit and Vegetables"]
sum_mode = "first-seen"

[staples]
items = ["Olive Oil", "salt and pepper"]
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.recipes, "https://example.com/recipes.json");
        assert_eq!(config.general.format, OutputFormat::Json);
        assert!(config.general.verbose);
        assert_eq!(
            config.planner.categories,
            vec![Category::Meat, Category::FruitAndVegetables]
        );
        assert_eq!(config.planner.sum_mode, SumMode::FirstSeen);
        assert_eq!(config.staples.seasoning_name, "salt and pepper");
        assert_eq!(config.staples.seasoning_categories, vec![Category::TinnedCupboard]);
        assert!(config.report.include_prep);

        let rules = config.list_rules();
        assert_eq!(rules.sum_mode, SumMode::FirstSeen);
        assert!(rules.catalog.contains("olive oil"));
        assert!(!rules.catalog.contains("butter"));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let toml_content = r#"
[planner]
categories = ["Sweets"]
"#;
        assert!(toml::from_str::<Config>(toml_content).is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[planner]"));
        assert!(toml_str.contains("[staples]"));
        assert!(toml_str.contains("Tinned/Cupboard"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.staples.items.len(), DEFAULT_STAPLES.len());
    }

    #[test]
    fn test_load_from_dir() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[store]\ntimeout_seconds = 5\n",
        )
        .unwrap();

        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.load_options().timeout, Duration::from_secs(5));
        assert_eq!(config.general.recipes, "recipes.json");
    }
}
