//! Shopping list aggregation.
//!
//! This module scales the selected recipes, merges ingredient lines that
//! share an item, unit and category, drops staples the user already owns
//! and groups what is left by category.

use crate::analysis::staples::{normalize_item, StapleCatalog, StapleSet};
use crate::error::PlannerError;
use crate::models::{
    AggregatedLine, Category, LineKey, Recipe, RecipeBook, ScaledIngredient, Selection,
    ShoppingList, ShoppingSection, SumMode,
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Reference data and behaviour switches for building a list.
#[derive(Debug, Clone)]
pub struct ListRules {
    /// Order of sections in the output. Categories not listed are dropped.
    pub category_order: Vec<Category>,
    /// How duplicate lines combine their amounts.
    pub sum_mode: SumMode,
    /// Staples the user may tick.
    pub catalog: StapleCatalog,
}

impl Default for ListRules {
    fn default() -> Self {
        Self {
            category_order: Category::ALL.to_vec(),
            sum_mode: SumMode::default(),
            catalog: StapleCatalog::default(),
        }
    }
}

/// Rounds to 2 decimal places, half away from zero.
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scale a recipe's ingredients to the desired number of portions.
///
/// Missing amounts (and amounts of zero) stay missing. Non-positive
/// portions are not rejected here.
pub fn scale_ingredients(recipe: &Recipe, desired_portions: f64) -> Vec<ScaledIngredient> {
    let scale = desired_portions / f64::from(recipe.portions.max(1));

    recipe
        .ingredients
        .iter()
        .map(|ingredient| {
            let display_name = ingredient
                .item
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string();
            let key = Some(normalize_item(&display_name)).filter(|k| !k.is_empty());

            ScaledIngredient {
                key,
                display_name,
                amount: ingredient
                    .amount
                    .filter(|a| *a != 0.0)
                    .map(|a| round_hundredths(a * scale)),
                unit: ingredient
                    .unit
                    .as_deref()
                    .map(str::trim)
                    .filter(|u| !u.is_empty())
                    .map(String::from),
                category: ingredient.category,
                prep: ingredient.prep.clone(),
            }
        })
        .collect()
}

/// Build the grouped shopping list for a selection.
pub fn aggregate(
    book: &RecipeBook,
    selection: &Selection,
    staples: &StapleSet,
    rules: &ListRules,
) -> Result<ShoppingList, PlannerError> {
    let picks = selection.resolve(book)?;

    let combined = picks
        .iter()
        .flat_map(|pick| scale_ingredients(pick.recipe, pick.portions));

    let mut lines: Vec<AggregatedLine> = Vec::new();
    let mut positions: HashMap<LineKey, usize> = HashMap::new();

    for scaled in combined {
        let Some(item) = scaled.key else {
            debug!("Skipping ingredient without an item name");
            continue;
        };

        let key = LineKey {
            item,
            unit: scaled.unit.clone(),
            category: scaled.category,
        };

        match positions.get(&key).copied() {
            Some(pos) => {
                let line = &mut lines[pos];
                line.amount = merge_amount(line.amount, scaled.amount, rules.sum_mode);
            }
            None => {
                positions.insert(key.clone(), lines.len());
                lines.push(AggregatedLine {
                    key,
                    display_name: scaled.display_name,
                    unit: scaled.unit,
                    category: scaled.category,
                    amount: scaled.amount,
                    prep: scaled.prep,
                });
            }
        }
    }

    lines.retain(|line| {
        let excluded = staples.excludes(&line.key.item, line.category, &rules.catalog);
        if excluded {
            debug!("Excluding staple: {}", line.display_name);
        }
        !excluded
    });

    for line in &lines {
        if !rules.category_order.contains(&line.category) {
            warn!(
                "Dropping {} from the list: category {} is not configured",
                line.display_name, line.category
            );
        }
    }

    Ok(group_by_category(lines, &rules.category_order))
}

/// Combine a group's running amount with the next line's amount.
fn merge_amount(total: Option<f64>, next: Option<f64>, mode: SumMode) -> Option<f64> {
    match (total, next, mode) {
        (Some(total), Some(next), _) => Some(round_hundredths(total + next)),
        (None, Some(next), SumMode::Available) => Some(next),
        (total, _, _) => total,
    }
}

/// Split lines into sections following the configured order.
fn group_by_category(lines: Vec<AggregatedLine>, order: &[Category]) -> ShoppingList {
    let mut seen = HashSet::new();
    let mut sections = Vec::new();

    for &category in order {
        if !seen.insert(category) {
            continue;
        }

        let section_lines: Vec<AggregatedLine> = lines
            .iter()
            .filter(|l| l.category == category)
            .cloned()
            .collect();

        if !section_lines.is_empty() {
            sections.push(ShoppingSection {
                category,
                lines: section_lines,
            });
        }
    }

    ShoppingList { sections }
}

/// Staples worth asking the user about for this selection.
///
/// Returned in the order they were discovered.
pub fn collect_staple_candidates(
    book: &RecipeBook,
    selection: &Selection,
    catalog: &StapleCatalog,
) -> Result<Vec<String>, PlannerError> {
    let picks = selection.resolve(book)?;
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    let items = picks
        .iter()
        .flat_map(|pick| pick.recipe.ingredients.iter())
        .filter_map(|ingredient| Some((ingredient.item.as_deref()?, ingredient.category)))
        .filter(|(item, _)| !item.trim().is_empty());

    for (item, category) in items {
        let name = catalog.canonical_name(item, category);
        if catalog.contains(&name) && seen.insert(name.clone()) {
            candidates.push(name);
        }
    }

    Ok(candidates)
}
