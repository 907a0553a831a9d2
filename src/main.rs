//! Mealplan - recipe shopping list builder
//!
//! A CLI tool that loads a recipe file, scales the selected recipes to
//! the requested portions and prints one combined, categorized shopping
//! list without the staples already in the pantry.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Error (bad arguments, recipe file not loadable, unknown recipe, etc.)

mod analysis;
mod cli;
mod config;
mod error;
mod models;
mod report;
mod store;

use analysis::{ListRules, StapleSet};
use anyhow::{Context, Result};
use chrono::Utc;
use cli::Args;
use config::Config;
use models::{RecipeBook, ReportMetadata, SelectedRecipe, Selection, ShoppingReport};
use store::RecipeSource;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&args, &config);

    info!("Mealplan v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args, config).await {
        error!("{:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .mealplan.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!("⚠️  .mealplan.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .mealplan.toml")?;

    println!("✅ Created .mealplan.toml with default settings.");
    println!("   Edit it to change the recipe file, category order and staple list.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so the list on stdout can be piped.
fn init_logging(args: &Args, config: &Config) {
    let level = if config.general.verbose && !args.quiet {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load configuration from file or use defaults, then apply CLI overrides.
fn load_config(args: &Args) -> Result<Config> {
    let mut config = match args.config {
        // An explicit config path must load
        Some(ref config_path) => Config::load(config_path)?,
        None => match Config::load_default() {
            Ok(Some(config)) => config,
            Ok(None) => Config::default(),
            Err(e) => {
                eprintln!("⚠️  Ignoring unreadable .mealplan.toml: {:#}", e);
                Config::default()
            }
        },
    };

    config.merge_with_args(args);
    Ok(config)
}

/// Load the recipes and produce the requested view.
async fn run(args: Args, config: Config) -> Result<()> {
    let source = RecipeSource::parse(&config.general.recipes);
    let book = store::load_recipes(&source, &config.load_options())
        .await
        .with_context(|| format!("Could not load recipes from {}", source))?;

    let format = config.general.format;

    let output = if args.list_recipes {
        report::render_recipe_index(&book, format)?
    } else if let Some(ref name) = args.show {
        let recipe = book.get(name)?;
        report::render_recipe(recipe, format)?
    } else {
        let rules = config.list_rules();
        let selection: Selection = args.select.iter().cloned().collect();
        let staples = StapleSet::from_names(&args.staples, &rules.catalog);
        debug!(
            "{} recipes selected, {} of {} staples owned",
            selection.len(),
            staples.names().len(),
            rules.catalog.items().len()
        );

        if args.list_staples {
            let candidates = analysis::collect_staple_candidates(&book, &selection, &rules.catalog)?;
            report::render_staple_checklist(&candidates, &staples, format)?
        } else {
            let report = build_report(&book, &selection, &staples, &rules, &source)?;
            info!(
                "Shopping list has {} items across {} categories",
                report.metadata.total_items,
                report.list.sections.len()
            );
            report::render_report(&report, format, &config.report)?
        }
    };

    write_output(&args, &output)
}

/// Aggregate the selection and wrap the list with its metadata.
fn build_report(
    book: &RecipeBook,
    selection: &Selection,
    staples: &StapleSet,
    rules: &ListRules,
    source: &RecipeSource,
) -> Result<ShoppingReport> {
    let list = analysis::aggregate(book, selection, staples, rules)?;

    let selected = selection
        .resolve(book)?
        .into_iter()
        .map(|pick| SelectedRecipe {
            name: pick.recipe.name.clone(),
            portions: pick.portions,
            default_portions: pick.recipe.portions,
        })
        .collect();

    if list.is_empty() {
        warn!("Every ingredient was excluded; the shopping list is empty");
    }

    Ok(ShoppingReport {
        metadata: ReportMetadata {
            recipe_source: source.to_string(),
            generated_at: Utc::now(),
            selection: selected,
            staples_excluded: staples.names().to_vec(),
            sum_mode: rules.sum_mode,
            total_items: list.item_count(),
        },
        list,
    })
}

/// Print the output, or save it when --output is given.
fn write_output(args: &Args, output: &str) -> Result<()> {
    match args.output {
        Some(ref path) => {
            std::fs::write(path, output)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !args.quiet {
                eprintln!("✅ Saved to: {}", path.display());
            }
        }
        None => print!("{}", output),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecipePick;
    use crate::store::loader::parse_recipes;

    const SAMPLE: &str = include_str!("../data/recipes.json");

    fn pick(name: &str, portions: Option<f64>) -> RecipePick {
        RecipePick {
            name: name.to_string(),
            portions,
        }
    }

    #[test]
    fn test_build_report_for_pasta_night() {
        let book = parse_recipes(SAMPLE).unwrap();
        let rules = ListRules::default();
        let selection: Selection = vec![
            pick("Spaghetti Bolognese", Some(2.0)),
            pick("Spaghetti Carbonara", Some(4.0)),
        ]
        .into_iter()
        .collect();
        let staples = StapleSet::from_names(["salt and pepper"], &rules.catalog);
        let source = RecipeSource::parse("data/recipes.json");

        let report = build_report(&book, &selection, &staples, &rules, &source).unwrap();

        let spaghetti = report
            .list
            .lines()
            .find(|l| l.key.item == "spaghetti")
            .unwrap();
        assert_eq!(spaghetti.amount, Some(500.0));

        assert!(report.list.lines().all(|l| l.key.item != "sea salt"));
        assert!(report.list.lines().all(|l| l.key.item != "cracked black pepper"));

        assert_eq!(report.metadata.selection.len(), 2);
        assert_eq!(report.metadata.selection[0].portions, 2.0);
        assert_eq!(report.metadata.selection[0].default_portions, 4);
        assert_eq!(report.metadata.total_items, report.list.item_count());
        assert_eq!(report.metadata.staples_excluded, vec!["salt and pepper"]);
    }

    #[test]
    fn test_build_report_unknown_recipe() {
        let book = parse_recipes(SAMPLE).unwrap();
        let selection: Selection = vec![pick("Shepherd's Pie", None)].into_iter().collect();
        let source = RecipeSource::parse("data/recipes.json");

        let result = build_report(
            &book,
            &selection,
            &StapleSet::new(),
            &ListRules::default(),
            &source,
        );
        assert!(result.unwrap_err().to_string().contains("Shepherd's Pie"));
    }

    #[test]
    fn test_build_report_fajitas_keeps_red_pepper() {
        let book = parse_recipes(SAMPLE).unwrap();
        let rules = ListRules::default();
        let selection: Selection = vec![pick("Chicken Fajitas", None)].into_iter().collect();
        let staples = StapleSet::from_names(["salt and pepper"], &rules.catalog);
        let source = RecipeSource::parse("data/recipes.json");

        let report = build_report(&book, &selection, &staples, &rules, &source).unwrap();
        let items: Vec<&str> = report.list.lines().map(|l| l.key.item.as_str()).collect();

        assert!(items.contains(&"red pepper"));
        assert!(!items.contains(&"salt and pepper"));
    }
}
