//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::{RecipePick, SumMode};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Mealplan - recipes in, shopping list out
///
/// Pick recipes, scale their portions, tick the staples you already
/// have and get one combined shopping list grouped by aisle.
///
/// Examples:
///   mealplan --list-recipes
///   mealplan --show "Spaghetti Carbonara"
///   mealplan -s "Spaghetti Bolognese=2" -s "Spaghetti Carbonara" --list-staples
///   mealplan -s "Spaghetti Bolognese=2" --staple "salt and pepper,spaghetti"
///   mealplan -r https://example.com/recipes.json -s "Chicken Fajitas" --format json
///   mealplan --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Recipe file path or http(s) URL
    ///
    /// Defaults to recipes.json, or the value in .mealplan.toml.
    #[arg(short, long, value_name = "SOURCE", env = "MEALPLAN_RECIPES")]
    pub recipes: Option<String>,

    /// Recipe to put on the list, optionally with portions
    ///
    /// Repeat for several recipes. Example: --select "Chicken Fajitas=4"
    #[arg(short, long = "select", value_name = "NAME[=PORTIONS]")]
    pub select: Vec<RecipePick>,

    /// Staples you already have (comma-separated)
    ///
    /// Example: --staple "olive oil,salt and pepper"
    #[arg(long = "staple", value_name = "NAMES", value_delimiter = ',')]
    pub staples: Vec<String>,

    /// List all recipes and exit
    #[arg(long, conflicts_with = "show")]
    pub list_recipes: bool,

    /// Show one recipe's ingredients and method, then exit
    #[arg(long, value_name = "NAME")]
    pub show: Option<String>,

    /// List the staples used by the selected recipes, then exit
    #[arg(long)]
    pub list_staples: bool,

    /// Output format (markdown, text, json)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// How amounts of repeated items are combined
    ///
    /// available: sum every known amount (default).
    /// first-seen: compatibility mode; an item first listed without an
    /// amount keeps no amount.
    #[arg(long, value_name = "MODE")]
    pub sum_mode: Option<SumMode>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .mealplan.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .mealplan.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for lists and recipe views.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// Plain text
    Text,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Whether the run only browses recipes and builds no list.
    pub fn is_browsing(&self) -> bool {
        self.list_recipes || self.show.is_some()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.is_browsing() {
            return Ok(());
        }

        if self.select.is_empty() {
            return Err(
                "Select at least one recipe with --select, or use --list-recipes".to_string(),
            );
        }

        // Validate portions
        for pick in &self.select {
            if let Some(portions) = pick.portions {
                if !portions.is_finite() || portions <= 0.0 {
                    return Err(format!(
                        "Portions for '{}' must be a positive number",
                        pick.name
                    ));
                }
            }
        }

        if let Some(staple) = self.staples.iter().find(|s| s.trim().is_empty()) {
            return Err(format!("Invalid staple name: '{}'", staple));
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            recipes: None,
            select: vec![RecipePick {
                name: "Spaghetti Bolognese".to_string(),
                portions: Some(2.0),
            }],
            staples: vec![],
            list_recipes: false,
            show: None,
            list_staples: false,
            format: None,
            output: None,
            sum_mode: None,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_from_command_line() {
        let args = Args::try_parse_from([
            "mealplan",
            "-s",
            "Spaghetti Bolognese=2",
            "--select",
            "Spaghetti Carbonara",
            "--staple",
            "salt and pepper,spaghetti",
            "--format",
            "json",
            "--sum-mode",
            "first-seen",
        ])
        .unwrap();

        assert_eq!(args.select.len(), 2);
        assert_eq!(args.select[0].portions, Some(2.0));
        assert_eq!(args.select[1].portions, None);
        assert_eq!(args.staples, vec!["salt and pepper", "spaghetti"]);
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.sum_mode, Some(SumMode::FirstSeen));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_requires_selection() {
        let mut args = make_args();
        args.select.clear();
        assert!(args.validate().is_err());

        args.list_recipes = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_non_positive_portions() {
        let mut args = make_args();
        args.select[0].portions = Some(0.0);
        assert!(args.validate().is_err());

        args.select[0].portions = Some(f64::NAN);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
