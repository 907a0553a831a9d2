//! Shopping list and recipe rendering.
//!
//! This module turns the aggregated shopping list, the staple checklist
//! and recipe views into Markdown, plain text or JSON.

use crate::analysis::StapleSet;
use crate::cli::OutputFormat;
use crate::config::ReportConfig;
use crate::models::{format_amount, Recipe, RecipeBook, ReportMetadata, ShoppingList, ShoppingReport};
use anyhow::Result;
use serde::Serialize;

/// Render a shopping list report in the requested format.
pub fn render_report(
    report: &ShoppingReport,
    format: OutputFormat,
    settings: &ReportConfig,
) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(generate_markdown_report(report, settings)),
        OutputFormat::Text => Ok(generate_text_report(report, settings)),
        OutputFormat::Json => generate_json_report(report),
    }
}

/// Generate a complete Markdown shopping list.
pub fn generate_markdown_report(report: &ShoppingReport, settings: &ReportConfig) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", settings.title));
    output.push_str(&generate_metadata_section(&report.metadata));

    if settings.include_selection {
        output.push_str(&generate_selection_section(&report.metadata));
    }

    output.push_str(&generate_list_section(&report.list, settings.include_prep));
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str(&format!("- **Recipes from:** {}\n", metadata.recipe_source));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Items:** {}\n", metadata.total_items));
    section.push_str(&format!("- **Amounts summed:** {}\n", metadata.sum_mode));
    if !metadata.staples_excluded.is_empty() {
        section.push_str(&format!(
            "- **Already in the pantry:** {}\n",
            metadata.staples_excluded.join(", ")
        ));
    }
    section.push('\n');

    section
}

/// Generate the table of selected recipes.
fn generate_selection_section(metadata: &ReportMetadata) -> String {
    if metadata.selection.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Recipes\n\n");
    section.push_str("| Recipe | Portions | Written for |\n");
    section.push_str("|:---|:---:|:---:|\n");

    for recipe in &metadata.selection {
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            recipe.name,
            format_amount(recipe.portions),
            recipe.default_portions
        ));
    }
    section.push('\n');

    section
}

/// Generate one heading and bullet list per category.
fn generate_list_section(list: &ShoppingList, include_prep: bool) -> String {
    let mut section = String::new();

    if list.is_empty() {
        section.push_str("Nothing to buy: everything is already in the pantry.\n\n");
        return section;
    }

    for group in &list.sections {
        section.push_str(&format!("## {}\n\n", group.category));
        for line in &group.lines {
            section.push_str(&format!("- [ ] {}\n", line.label(include_prep)));
        }
        section.push('\n');
    }

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str(&format!(
        "*Generated by mealplan v{}*\n",
        env!("CARGO_PKG_VERSION")
    ));

    footer
}

/// Generate a plain text shopping list.
pub fn generate_text_report(report: &ShoppingReport, settings: &ReportConfig) -> String {
    let mut output = String::new();

    output.push_str(&settings.title);
    output.push('\n');
    output.push_str(&"=".repeat(settings.title.chars().count()));
    output.push_str("\n\n");

    if report.list.is_empty() {
        output.push_str("Nothing to buy.\n");
        return output;
    }

    for group in &report.list.sections {
        output.push_str(&format!("{}\n", group.category));
        for line in &group.lines {
            output.push_str(&format!("  - {}\n", line.label(settings.include_prep)));
        }
        output.push('\n');
    }

    output
}

/// Generate a JSON report.
pub fn generate_json_report(report: &ShoppingReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[derive(Serialize)]
struct RecipeSummary<'a> {
    name: &'a str,
    portions: u32,
    ingredients: usize,
}

/// Render the list of available recipes.
pub fn render_recipe_index(book: &RecipeBook, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        let summaries: Vec<RecipeSummary<'_>> = book
            .recipes
            .iter()
            .map(|r| RecipeSummary {
                name: &r.name,
                portions: r.portions,
                ingredients: r.ingredients.len(),
            })
            .collect();
        return serde_json::to_string_pretty(&summaries).map_err(Into::into);
    }

    let mut output = String::new();

    if format == OutputFormat::Markdown {
        output.push_str("# Recipes\n\n");
    }

    if book.is_empty() {
        output.push_str("No recipes available.\n");
        return Ok(output);
    }

    for recipe in &book.recipes {
        output.push_str(&format!(
            "- {} (serves {})\n",
            recipe.name, recipe.portions
        ));
    }

    Ok(output)
}

/// Render one recipe: ingredients at default portions, then the method.
pub fn render_recipe(recipe: &Recipe, format: OutputFormat) -> Result<String> {
    let mut output = String::new();

    match format {
        OutputFormat::Json => return serde_json::to_string_pretty(recipe).map_err(Into::into),
        OutputFormat::Markdown => {
            output.push_str(&format!("# {}\n\n", recipe.name));
            output.push_str(&format!("*Serves {}*\n\n", recipe.portions));
            output.push_str("## Ingredients\n\n");
            for ingredient in &recipe.ingredients {
                output.push_str(&format!("- {}\n", ingredient.label()));
            }
            output.push_str("\n## Method\n\n");
        }
        OutputFormat::Text => {
            output.push_str(&format!("{} (serves {})\n\n", recipe.name, recipe.portions));
            output.push_str("Ingredients:\n");
            for ingredient in &recipe.ingredients {
                output.push_str(&format!("  - {}\n", ingredient.label()));
            }
            output.push_str("\nMethod:\n");
        }
    }

    output.push_str(&recipe.method);
    output.push('\n');

    Ok(output)
}

#[derive(Serialize)]
struct StapleEntry<'a> {
    name: &'a str,
    owned: bool,
}

/// Render the staple checklist for a selection.
pub fn render_staple_checklist(
    candidates: &[String],
    owned: &StapleSet,
    format: OutputFormat,
) -> Result<String> {
    if format == OutputFormat::Json {
        let entries: Vec<StapleEntry<'_>> = candidates
            .iter()
            .map(|name| StapleEntry {
                name,
                owned: owned.contains(name),
            })
            .collect();
        return serde_json::to_string_pretty(&entries).map_err(Into::into);
    }

    let mut output = String::new();

    if format == OutputFormat::Markdown {
        output.push_str("# Staples\n\n");
    }

    if candidates.is_empty() {
        output.push_str("The selected recipes use no known staples.\n");
        return Ok(output);
    }

    for name in candidates {
        let mark = if owned.contains(name) { "x" } else { " " };
        output.push_str(&format!("- [{}] {}\n", mark, name));
    }

    Ok(output)
}
